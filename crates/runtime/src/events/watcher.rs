//! Relevance filtering over a tab's subscriptions.

use std::collections::BTreeSet;

use super::subscription::{CrossTabSubscription, SignalSubscription};
use super::{BusError, Result, Signal};

/// Keys a view depends on.
///
/// Exact keys plus key prefixes, so `registrations_` covers every
/// per-tournament registration list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interest {
    keys: BTreeSet<String>,
    prefixes: BTreeSet<String>,
}

impl Interest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.keys.insert(key.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into());
        self
    }

    /// Union of two interest sets.
    pub fn merge(mut self, other: Interest) -> Self {
        self.keys.extend(other.keys);
        self.prefixes.extend(other.prefixes);
        self
    }

    pub fn matches(&self, key: &str) -> bool {
        self.keys.contains(key) || self.prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }
}

/// Why a view should be recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// Another tab changed a key of interest.
    KeyChanged(String),
    /// A signal was raised in this tab.
    Signal(Signal),
    /// Notifications were dropped; reconcile with a full re-read.
    Missed,
}

/// A tab's cross-tab and same-tab subscriptions filtered through an
/// [`Interest`].
///
/// Every same-tab signal counts as relevant: signals carry no key.
pub struct Watcher {
    interest: Interest,
    changes: CrossTabSubscription,
    signals: SignalSubscription,
}

impl Watcher {
    pub(crate) fn new(
        interest: Interest,
        changes: CrossTabSubscription,
        signals: SignalSubscription,
    ) -> Self {
        Self {
            interest,
            changes,
            signals,
        }
    }

    pub fn interest(&self) -> &Interest {
        &self.interest
    }

    /// Drains pending notifications without waiting and returns the
    /// relevant ones in arrival order per channel.
    pub fn poll(&mut self) -> Result<Vec<Refresh>> {
        let mut refreshes = Vec::new();

        loop {
            match self.changes.try_recv() {
                Ok(Some(event)) => {
                    if self.interest.matches(&event.key) {
                        refreshes.push(Refresh::KeyChanged(event.key));
                    }
                }
                Ok(None) => break,
                Err(BusError::Lagged(missed)) => {
                    tracing::debug!("Watcher missed {} cross-tab notifications", missed);
                    refreshes.push(Refresh::Missed);
                }
                Err(err) => return Err(err),
            }
        }

        loop {
            match self.signals.try_recv() {
                Ok(Some(signal)) => refreshes.push(Refresh::Signal(signal)),
                Ok(None) => break,
                Err(BusError::Lagged(_)) => refreshes.push(Refresh::Missed),
                Err(err) => return Err(err),
            }
        }

        Ok(refreshes)
    }

    /// Whether anything relevant arrived since the last poll.
    pub fn needs_refresh(&mut self) -> Result<bool> {
        Ok(!self.poll()?.is_empty())
    }

    /// Waits for the next relevant notification.
    pub async fn next(&mut self) -> Result<Refresh> {
        loop {
            tokio::select! {
                change = self.changes.recv() => match change {
                    Ok(event) if self.interest.matches(&event.key) => {
                        return Ok(Refresh::KeyChanged(event.key));
                    }
                    Ok(_) => continue,
                    Err(BusError::Lagged(_)) => return Ok(Refresh::Missed),
                    Err(err) => return Err(err),
                },
                signal = self.signals.recv() => match signal {
                    Ok(signal) => return Ok(Refresh::Signal(signal)),
                    Err(BusError::Lagged(_)) => return Ok(Refresh::Missed),
                    Err(err) => return Err(err),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_matching() {
        let interest = Interest::new()
            .key("userData")
            .prefix("registrations_");

        assert!(interest.matches("userData"));
        assert!(interest.matches("registrations_7"));
        assert!(!interest.matches("tournaments"));
        assert!(!interest.matches("userData2"));

        let merged = interest.merge(Interest::new().key("tournaments"));
        assert!(merged.matches("tournaments"));
    }
}
