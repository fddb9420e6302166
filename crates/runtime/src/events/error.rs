use thiserror::Error;

use super::TabId;

/// Errors surfaced by the change notification bus.
#[derive(Debug, Error)]
pub enum BusError {
    /// Every sender for the channel is gone (origin or tab dropped).
    #[error("notification channel closed")]
    Closed,

    /// The receiver fell behind and `{0}` notifications were dropped.
    #[error("receiver lagged behind by {0} notifications")]
    Lagged(u64),

    #[error("unknown tab {0}")]
    UnknownTab(TabId),
}

pub type Result<T> = std::result::Result<T, BusError>;
