//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod clean;
mod read_store;
mod seed;
mod stats;

pub use clean::Clean;
pub use read_store::ReadStore;
pub use seed::Seed;
pub use stats::Stats;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use runtime::{FileStore, Origin, RuntimeConfig};

/// Store directory from the command line, or the default location.
fn resolve_dir(dir: Option<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(crate::dirs::store_dir)
}

/// Opens the file store at `dir` as an origin configured from the
/// environment. Creates the directory when missing.
fn open_origin(dir: &Path) -> Result<Origin> {
    let config = RuntimeConfig::from_env();
    let store = FileStore::with_quota(dir, config.store.quota_bytes)
        .with_context(|| format!("Failed to open store: {}", dir.display()))?;

    Ok(Origin::new(Arc::new(store)).with_settings(config.views.into()))
}

fn ensure_exists(dir: &Path) -> Result<()> {
    if !dir.exists() {
        anyhow::bail!(
            "Store directory not found: {}\n\nHint: run `cargo xtask seed` or set STORE_DIR",
            dir.display()
        );
    }
    Ok(())
}
