//! Unified error type surfaced by the runtime API.
//!
//! Wraps storage and bus failures so flows that touch both (sign in, tab
//! setup) can bubble them up through one `Result`.
use thiserror::Error;

use crate::events::BusError;
use crate::storage::StorageError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Bus(#[from] BusError),
}

impl RuntimeError {
    /// Whether the requested write did not happen.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, RuntimeError::Storage(_))
    }
}
