//! Storage adapter over an origin-wide key/value store.
//!
//! Backends implement [`KeyValueStore`] and hold raw text. [`StorageReader`]
//! and [`Storage`] add JSON decoding with defaults on read, typed
//! [`StorageError`]s on write, and cross-tab change announcements.

mod adapter;
mod error;
mod file;
mod memory;
mod traits;

pub use adapter::{Storage, StorageReader};
pub use error::{Result, StorageError};
pub use file::FileStore;
pub use memory::{DEFAULT_QUOTA_BYTES, InMemoryStore};
pub use traits::KeyValueStore;
