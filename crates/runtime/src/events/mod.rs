//! Change notification bus.
//!
//! Two channels per origin: a cross-tab channel announcing persisted or
//! removed keys to every tab except the writer, and a same-tab channel for
//! named signals that writers raise explicitly after persisting. Views
//! listen through a [`Watcher`] and recompute from a fresh read.

mod bus;
mod error;
mod subscription;
mod types;
mod watcher;

pub use bus::{ChangeBus, DEFAULT_BUS_CAPACITY};
pub use error::{BusError, Result};
pub use subscription::{CrossTabSubscription, SignalSubscription};
pub use types::{Signal, StorageEvent, TabId};
pub use watcher::{Interest, Refresh, Watcher};
