//! Origins and the tabs opened against them.
//!
//! An [`Origin`] owns the shared key/value store and the change bus. Each
//! [`Tab`] is one browsing context with its own id, storage handle and
//! same-tab signal channel.

use std::sync::Arc;

use crate::config::{RuntimeConfig, StoreBackend};
use crate::error::Result;
use crate::events::{self, ChangeBus, Interest, Signal, TabId, Watcher};
use crate::repository::{
    RegistrationRepository, SessionRepository, TournamentRepository, UserRepository,
};
use crate::storage::{FileStore, InMemoryStore, KeyValueStore, Storage};
use crate::views::{ViewBuilder, ViewSettings};

/// Shared store and bus for every tab of one origin.
pub struct Origin {
    backend: Arc<dyn KeyValueStore>,
    bus: ChangeBus,
    settings: ViewSettings,
}

impl Origin {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            bus: ChangeBus::new(),
            settings: ViewSettings::default(),
        }
    }

    /// Origin over a fresh [`InMemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    /// Builds the configured backend, bus and view settings.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self> {
        let backend: Arc<dyn KeyValueStore> = match config.store.backend {
            StoreBackend::Memory => Arc::new(InMemoryStore::with_quota(config.store.quota_bytes)),
            StoreBackend::File => Arc::new(FileStore::with_quota(
                &config.store.dir,
                config.store.quota_bytes,
            )?),
        };
        tracing::info!("Opened {} store", config.store.backend);

        Ok(Self {
            backend,
            bus: ChangeBus::with_capacity(config.bus.capacity),
            settings: config.views.clone().into(),
        })
    }

    pub fn with_settings(mut self, settings: ViewSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_bus(mut self, bus: ChangeBus) -> Self {
        self.bus = bus;
        self
    }

    pub fn backend(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.backend)
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    /// Opens a new browsing context.
    pub fn open_tab(&self) -> Tab {
        let id = self.bus.register_tab();
        Tab {
            storage: Storage::new(self.backend(), self.bus.clone(), id),
            settings: self.settings.clone(),
        }
    }
}

/// One browsing context. Dropping it closes its same-tab channel.
pub struct Tab {
    storage: Storage,
    settings: ViewSettings,
}

impl Tab {
    pub fn id(&self) -> TabId {
        self.storage.tab()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.storage.clone())
    }

    pub fn tournaments(&self) -> TournamentRepository {
        TournamentRepository::new(self.storage.clone())
    }

    pub fn registrations(&self) -> RegistrationRepository {
        RegistrationRepository::new(self.storage.clone())
    }

    pub fn session(&self) -> SessionRepository {
        SessionRepository::new(self.storage.clone())
    }

    /// View assembly over read-only repositories.
    pub fn views(&self) -> ViewBuilder {
        ViewBuilder::new(self.storage.reader(), self.settings.clone())
    }

    /// The tab regained focus.
    pub fn focus(&self) -> events::Result<()> {
        self.storage.raise(Signal::FocusRegained)
    }

    /// Subscribes to changes relevant to `interest`, made by other tabs, and
    /// to every signal raised in this tab.
    pub fn watch(&self, interest: Interest) -> events::Result<Watcher> {
        let bus = self.storage.bus();
        Ok(Watcher::new(
            interest,
            bus.subscribe_cross_tab(self.id()),
            bus.subscribe_same_tab(self.id())?,
        ))
    }
}

impl Drop for Tab {
    fn drop(&mut self) {
        self.storage.bus().close_tab(self.id());
    }
}
