//! Per-origin change notification bus.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast;

use super::subscription::{CrossTabSubscription, SignalSubscription};
use super::{BusError, Result, Signal, StorageEvent, TabId};

/// Default capacity of each broadcast channel.
pub const DEFAULT_BUS_CAPACITY: usize = 100;

/// Change notification bus shared by all tabs of one origin.
///
/// Two channels:
/// - cross-tab: one broadcast channel for the whole origin. Every write
///   publishes its key here; each subscription drops events from its own tab.
/// - same-tab: one broadcast channel per registered tab, carrying [`Signal`]s
///   raised explicitly by writers in that tab.
///
/// Publishing never blocks and never fails when nobody is listening.
pub struct ChangeBus {
    inner: Arc<Inner>,
}

struct Inner {
    cross_tab: broadcast::Sender<StorageEvent>,
    same_tab: RwLock<HashMap<TabId, broadcast::Sender<Signal>>>,
    next_tab: AtomicU64,
    capacity: usize,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUS_CAPACITY)
    }

    /// Creates a bus whose channels buffer `capacity` notifications (min 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Inner {
                cross_tab: broadcast::channel(capacity).0,
                same_tab: RwLock::new(HashMap::new()),
                next_tab: AtomicU64::new(1),
                capacity,
            }),
        }
    }

    /// Registers a new tab and opens its same-tab channel.
    pub fn register_tab(&self) -> TabId {
        let tab = TabId(self.inner.next_tab.fetch_add(1, Ordering::Relaxed));
        let (tx, _) = broadcast::channel(self.inner.capacity);
        self.inner
            .same_tab
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tab, tx);
        tracing::debug!("Registered {}", tab);
        tab
    }

    /// Closes a tab's same-tab channel. Its signal subscribers observe
    /// [`BusError::Closed`].
    pub fn close_tab(&self, tab: TabId) {
        let removed = self
            .inner
            .same_tab
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&tab);
        if removed.is_some() {
            tracing::debug!("Closed {}", tab);
        }
    }

    /// Announces a persisted or removed key to every other tab.
    pub fn publish_change(&self, origin: TabId, key: &str) {
        let event = StorageEvent {
            key: key.to_string(),
            origin,
        };
        if self.inner.cross_tab.send(event).is_err() {
            tracing::trace!("No cross-tab subscribers for '{}'", key);
        }
    }

    /// Raises `signal` for every subscriber resident in `tab`.
    pub fn raise(&self, tab: TabId, signal: Signal) -> Result<()> {
        let channels = self
            .inner
            .same_tab
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let tx = channels.get(&tab).ok_or(BusError::UnknownTab(tab))?;
        if tx.send(signal).is_err() {
            tracing::trace!("No subscribers for {} in {}", signal, tab);
        }
        Ok(())
    }

    /// Cross-tab notifications as seen from `tab`.
    pub fn subscribe_cross_tab(&self, tab: TabId) -> CrossTabSubscription {
        CrossTabSubscription::new(tab, self.inner.cross_tab.subscribe())
    }

    /// Signals raised in `tab`.
    pub fn subscribe_same_tab(&self, tab: TabId) -> Result<SignalSubscription> {
        let channels = self
            .inner
            .same_tab
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let tx = channels.get(&tab).ok_or(BusError::UnknownTab(tab))?;
        Ok(SignalSubscription::new(tx.subscribe()))
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }
}

impl Clone for ChangeBus {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}
