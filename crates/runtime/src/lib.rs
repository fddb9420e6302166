//! Local-first data layer for the tournament manager.
//!
//! This crate wires the `tournament-core` records to an origin-wide
//! key/value store, announces changes between concurrently open tabs, and
//! assembles page views from fresh reads. Consumers create an [`Origin`],
//! open a [`Tab`] per browsing context and use its repositories, views and
//! watchers.
//!
//! Modules are organized by responsibility:
//! - [`storage`] hosts the key/value backends and the JSON storage adapter
//! - [`repository`] exposes the per-entity readers and writers
//! - [`events`] provides the cross-tab and same-tab notification bus
//! - [`views`] assembles home, profile and dashboard views
//! - [`config`] loads settings from the environment
pub mod config;
pub mod events;
pub mod repository;
pub mod storage;
pub mod views;

mod error;
mod origin;

pub use config::{RuntimeConfig, StoreBackend};
pub use error::{Result, RuntimeError};
pub use events::{BusError, ChangeBus, Interest, Refresh, Signal, StorageEvent, TabId, Watcher};
pub use origin::{Origin, Tab};
pub use repository::{
    RegistrationReader, RegistrationRepository, SessionReader, SessionRepository,
    TournamentReader, TournamentRepository, UserReader, UserRepository,
};
pub use storage::{FileStore, InMemoryStore, KeyValueStore, Storage, StorageError, StorageReader};
pub use views::{DashboardView, HomeView, ProfileView, ViewBuilder, ViewSettings};
