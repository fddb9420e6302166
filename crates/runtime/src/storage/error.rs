//! Error types raised by key/value backends and repository writes.
//!
//! Reads never surface these: a failed or malformed read degrades to the
//! documented default. Writes return them so the initiating action can
//! report "not saved" instead of losing the write silently.

use thiserror::Error;

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("quota exceeded writing '{key}': {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("storage is unavailable")]
    Unavailable,

    #[error("duplicate tournament id {0}")]
    DuplicateTournamentId(String),
}

impl StorageError {
    /// Whether the failure is the store refusing the write (quota or
    /// disabled storage) rather than a fault.
    pub fn is_write_refused(&self) -> bool {
        matches!(
            self,
            StorageError::QuotaExceeded { .. } | StorageError::Unavailable
        )
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
