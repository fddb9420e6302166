//! JSON-aware storage handles bound to a tab.

use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::events::{self, ChangeBus, Signal, TabId};

use super::{KeyValueStore, Result};

/// Read-only view of the origin's store.
///
/// Reads never fail: absent keys, unreadable backends and malformed text
/// all come back as "nothing stored", and callers fall back to defaults.
#[derive(Clone)]
pub struct StorageReader {
    backend: Arc<dyn KeyValueStore>,
}

impl StorageReader {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Raw stored text, as written by [`Storage::set_text`].
    pub fn get_text(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(text) => {
                if text.is_none() {
                    tracing::trace!("Key '{}' is not stored", key);
                }
                text
            }
            Err(err) => {
                tracing::warn!("Failed to read '{}': {}", key, err);
                None
            }
        }
    }

    /// Parsed JSON for `key`; `None` when absent or malformed.
    pub fn get_value(&self, key: &str) -> Option<Value> {
        let text = self.get_text(key)?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!("Ignoring malformed value under '{}': {}", key, err);
                None
            }
        }
    }

    /// Decoded value for `key`, or `T::default()` when absent or malformed.
    pub fn get<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(value) = self.get_value(key) else {
            return T::default();
        };
        serde_json::from_value(value).unwrap_or_else(|err| {
            tracing::warn!("Stored '{}' has an unexpected shape: {}", key, err);
            T::default()
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get_text(key).is_some()
    }

    /// Stored keys; empty when the backend cannot be listed.
    pub fn keys(&self) -> Vec<String> {
        self.backend.keys().unwrap_or_else(|err| {
            tracing::warn!("Failed to list stored keys: {}", err);
            Vec::new()
        })
    }
}

/// Read-write storage handle of one tab.
///
/// Every successful write or removal is announced on the cross-tab channel
/// after the backend has persisted it. Writes raise no same-tab signal;
/// callers that need one use [`Storage::raise`] once their writes are done.
#[derive(Clone)]
pub struct Storage {
    reader: StorageReader,
    bus: ChangeBus,
    tab: TabId,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>, bus: ChangeBus, tab: TabId) -> Self {
        Self {
            reader: StorageReader::new(backend),
            bus,
            tab,
        }
    }

    pub fn tab(&self) -> TabId {
        self.tab
    }

    pub fn reader(&self) -> StorageReader {
        self.reader.clone()
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    /// Serializes `value` as JSON and persists it under `key`.
    pub fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let text = serde_json::to_string(value)?;
        self.set_text(key, &text)
    }

    /// Persists raw text under `key`.
    ///
    /// Rewriting the value already stored succeeds without notifying other
    /// tabs.
    pub fn set_text(&self, key: &str, text: &str) -> Result<()> {
        let previous = self.reader.backend.get(key).ok().flatten();
        self.reader.backend.set(key, text)?;

        if previous.as_deref() != Some(text) {
            self.bus.publish_change(self.tab, key);
        }
        Ok(())
    }

    /// Removes `key`, returning whether it was stored.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let removed = self.reader.backend.remove(key)?;
        if removed {
            self.bus.publish_change(self.tab, key);
        }
        Ok(removed)
    }

    /// Raises a same-tab signal in this tab.
    pub fn raise(&self, signal: Signal) -> events::Result<()> {
        self.bus.raise(self.tab, signal)
    }
}

impl Deref for Storage {
    type Target = StorageReader;

    fn deref(&self) -> &StorageReader {
        &self.reader
    }
}
