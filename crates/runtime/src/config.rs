//! Runtime configuration structures and loaders.

use std::env;
use std::path::PathBuf;

use tournament_core::{FixedBaseline, OwnershipMatch};

use crate::events::DEFAULT_BUS_CAPACITY;
use crate::storage::DEFAULT_QUOTA_BYTES;
use tournament_core::views::DEFAULT_FEATURED_LIMIT;

/// Top-level configuration for an [`Origin`](crate::Origin).
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    pub store: StoreConfig,
    pub bus: BusConfig,
    pub views: ViewConfig,
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `STORE_BACKEND` - `memory` or `file` (default: memory)
    /// - `STORE_DIR` - Directory of the file store (default: platform data dir)
    /// - `STORE_QUOTA_BYTES` - Byte quota of the store (default: 5242880)
    /// - `BUS_CAPACITY` - Notifications buffered per channel (default: 100)
    /// - `FEATURED_LIMIT` - Tournaments featured on the home page (default: 3)
    /// - `BASELINE_TOTAL` - Last-month total tournaments (default: 10)
    /// - `BASELINE_ACTIVE` - Last-month active tournaments (default: 2)
    /// - `BASELINE_UPCOMING` - Last-month upcoming tournaments (default: 2)
    /// - `OWNERSHIP_MATCH` - `identifier`, `prefer-identifier` or
    ///   `legacy-name` (default: prefer-identifier)
    ///
    /// Unparsable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Store
        if let Some(backend) = read_env::<StoreBackend>("STORE_BACKEND") {
            config.store.backend = backend;
        }
        if let Some(dir) = read_env::<PathBuf>("STORE_DIR") {
            config.store.dir = dir;
        }
        if let Some(quota) = read_env::<usize>("STORE_QUOTA_BYTES") {
            config.store.quota_bytes = quota;
        }

        // Bus
        if let Some(capacity) = read_env::<usize>("BUS_CAPACITY") {
            config.bus.capacity = capacity.max(1);
        }

        // Views
        if let Some(limit) = read_env::<usize>("FEATURED_LIMIT") {
            config.views.featured_limit = limit;
        }
        if let Some(total) = read_env::<u64>("BASELINE_TOTAL") {
            config.views.baseline.total = total;
        }
        if let Some(active) = read_env::<u64>("BASELINE_ACTIVE") {
            config.views.baseline.active = active;
        }
        if let Some(upcoming) = read_env::<u64>("BASELINE_UPCOMING") {
            config.views.baseline.upcoming = upcoming;
        }
        if let Some(policy) = read_env::<OwnershipMatch>("OWNERSHIP_MATCH") {
            config.views.ownership = policy;
        }

        config
    }
}

/// Which [`KeyValueStore`](crate::storage::KeyValueStore) backs the origin.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Only used by the file backend.
    pub dir: PathBuf,
    pub quota_bytes: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            dir: default_store_dir(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BusConfig {
    pub capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_BUS_CAPACITY,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ViewConfig {
    pub featured_limit: usize,
    pub baseline: FixedBaseline,
    pub ownership: OwnershipMatch,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            featured_limit: DEFAULT_FEATURED_LIMIT,
            baseline: FixedBaseline::default(),
            ownership: OwnershipMatch::default(),
        }
    }
}

/// Platform data directory for the file store.
///
/// - macOS: `~/Library/Application Support/chess-tournament-pro/store`
/// - Linux: `~/.local/share/chess-tournament-pro/store`
/// - Windows: `%APPDATA%\chess-tournament-pro\data\store`
/// - Fallback: `./store_data`
pub fn default_store_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "chess-tournament-pro")
        .map(|dirs| dirs.data_dir().join("store"))
        .unwrap_or_else(|| PathBuf::from("./store_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.quota_bytes, 5_242_880);
        assert_eq!(config.bus.capacity, 100);
        assert_eq!(config.views.featured_limit, 3);
        assert_eq!(config.views.baseline, FixedBaseline::default());
        assert_eq!(config.views.ownership, OwnershipMatch::PreferIdentifier);
    }

    #[test]
    fn test_backend_names() {
        assert_eq!("file".parse::<StoreBackend>().unwrap(), StoreBackend::File);
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }
}
