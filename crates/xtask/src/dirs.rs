//! Platform-specific directory utilities
//!
//! Resolves the file store directory the same way the runtime does, so
//! xtask commands operate on the data the application wrote.

use std::path::PathBuf;

/// Get the file store directory
///
/// `STORE_DIR` wins when set. Otherwise follows platform conventions:
/// - macOS: `~/Library/Application Support/chess-tournament-pro/store`
/// - Linux: `~/.local/share/chess-tournament-pro/store` (or `$XDG_DATA_HOME/...`)
/// - Windows: `%APPDATA%\chess-tournament-pro\data\store`
/// - Fallback: `./store_data`
pub fn store_dir() -> PathBuf {
    std::env::var_os("STORE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(runtime::config::default_store_dir)
}
