//! Backend contract for the origin-wide key/value store.

use super::Result;

/// Raw text slots keyed by string, shared by every tab of an origin.
///
/// Backends store text verbatim; JSON encoding happens in
/// [`StorageReader`](super::StorageReader) and [`Storage`](super::Storage).
/// Implementations: [`InMemoryStore`](super::InMemoryStore) for tests and
/// single-process use, [`FileStore`](super::FileStore) for persistence
/// across restarts.
pub trait KeyValueStore: Send + Sync {
    /// Stored text for `key`, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Persist `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns whether it existed.
    fn remove(&self, key: &str) -> Result<bool>;

    /// All keys currently stored, sorted.
    fn keys(&self) -> Result<Vec<String>>;

    /// Bytes in use, counted as key length plus value length.
    fn usage(&self) -> Result<usize> {
        let mut total = 0;
        for key in self.keys()? {
            if let Some(value) = self.get(&key)? {
                total += key.len() + value.len();
            }
        }
        Ok(total)
    }
}
