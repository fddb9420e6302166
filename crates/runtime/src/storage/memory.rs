//! In-memory KeyValueStore implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStore, Result, StorageError};

/// Default per-origin quota, in bytes of key plus value text.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// In-memory implementation of KeyValueStore.
///
/// Enforces a byte quota the way a browser origin does, and can be built
/// disabled to model storage being switched off entirely.
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: usize,
    enabled: bool,
}

impl InMemoryStore {
    /// Create a new empty store with the default quota.
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    /// Create a new empty store holding at most `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota,
            enabled: true,
        }
    }

    /// A store that refuses every write and reads as empty.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Seed entries without quota checks.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        if let Ok(mut map) = store.entries.write() {
            map.extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        }
        store
    }

    pub fn quota(&self) -> usize {
        self.quota
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if !self.enabled {
            return Err(StorageError::Unavailable);
        }
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if !self.enabled {
            return Err(StorageError::Unavailable);
        }
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;

        let in_use: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        let needed = in_use + key.len() + value.len();
        if needed > self.quota {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                needed,
                quota: self.quota,
            });
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        if !self.enabled {
            return Err(StorageError::Unavailable);
        }
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.enabled {
            return Err(StorageError::Unavailable);
        }
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::LockPoisoned)?;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort_unstable();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = InMemoryStore::new();
        store.set("tournaments", "[]").unwrap();
        assert_eq!(store.get("tournaments").unwrap().as_deref(), Some("[]"));

        assert!(store.remove("tournaments").unwrap());
        assert!(!store.remove("tournaments").unwrap());
        assert_eq!(store.get("tournaments").unwrap(), None);
    }

    #[test]
    fn test_quota_rejects_and_keeps_previous_value() {
        let store = InMemoryStore::with_quota(16);
        store.set("k", "small").unwrap();

        let err = store.set("k", "this value is far too large").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 16, .. }));
        assert!(err.is_write_refused());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_quota_counts_replacement_not_sum() {
        let store = InMemoryStore::with_quota(10);
        store.set("k", "123456789").unwrap();
        store.set("k", "987654321").unwrap();
        assert_eq!(store.usage().unwrap(), 10);
    }

    #[test]
    fn test_disabled_store() {
        let store = InMemoryStore::disabled();
        assert!(matches!(store.set("k", "v"), Err(StorageError::Unavailable)));
        assert!(matches!(store.get("k"), Err(StorageError::Unavailable)));
    }

    #[test]
    fn test_keys_sorted() {
        let store = InMemoryStore::with_entries([("userData", "{}"), ("authToken", "t")]);
        assert_eq!(store.keys().unwrap(), ["authToken", "userData"]);
    }
}
