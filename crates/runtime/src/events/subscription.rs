//! Receiving ends of the bus channels.

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use super::{BusError, Result, Signal, StorageEvent, TabId};

/// Cross-tab notifications for one tab, excluding the tab's own writes.
pub struct CrossTabSubscription {
    tab: TabId,
    rx: broadcast::Receiver<StorageEvent>,
}

impl CrossTabSubscription {
    pub(crate) fn new(tab: TabId, rx: broadcast::Receiver<StorageEvent>) -> Self {
        Self { tab, rx }
    }

    pub fn tab(&self) -> TabId {
        self.tab
    }

    /// Waits for the next change made by another tab.
    pub async fn recv(&mut self) -> Result<StorageEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.origin == self.tab => continue,
                Ok(event) => return Ok(event),
                Err(err) => return Err(recv_error(err)),
            }
        }
    }

    /// Next pending change made by another tab, without waiting.
    pub fn try_recv(&mut self) -> Result<Option<StorageEvent>> {
        loop {
            match self.rx.try_recv() {
                Ok(event) if event.origin == self.tab => continue,
                Ok(event) => return Ok(Some(event)),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(err) => return Err(try_recv_error(err)),
            }
        }
    }
}

/// Signals raised in one tab.
pub struct SignalSubscription {
    rx: broadcast::Receiver<Signal>,
}

impl SignalSubscription {
    pub(crate) fn new(rx: broadcast::Receiver<Signal>) -> Self {
        Self { rx }
    }

    pub async fn recv(&mut self) -> Result<Signal> {
        self.rx.recv().await.map_err(recv_error)
    }

    pub fn try_recv(&mut self) -> Result<Option<Signal>> {
        match self.rx.try_recv() {
            Ok(signal) => Ok(Some(signal)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(err) => Err(try_recv_error(err)),
        }
    }
}

fn recv_error(err: RecvError) -> BusError {
    match err {
        RecvError::Closed => BusError::Closed,
        RecvError::Lagged(missed) => BusError::Lagged(missed),
    }
}

fn try_recv_error(err: TryRecvError) -> BusError {
    match err {
        TryRecvError::Lagged(missed) => BusError::Lagged(missed),
        TryRecvError::Empty | TryRecvError::Closed => BusError::Closed,
    }
}
