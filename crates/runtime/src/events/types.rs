//! Notification payloads for the cross-tab and same-tab channels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one browsing context within an origin.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TabId(pub(crate) u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// A key was persisted or removed by another tab.
///
/// Carries only the key; receivers re-read the store for the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEvent {
    pub key: String,
    /// Tab that performed the write. Never equal to the receiving tab.
    pub origin: TabId,
}

/// Named same-tab signals. They carry no key, so subscribers re-check
/// relevance themselves.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum Signal {
    /// Session state changed in this tab (sign in, sign out).
    #[strum(serialize = "authChange")]
    #[serde(rename = "authChange")]
    AuthChanged,
    /// The tab regained focus; consumers reconcile with a full re-read.
    #[strum(serialize = "focus")]
    #[serde(rename = "focus")]
    FocusRegained,
}
