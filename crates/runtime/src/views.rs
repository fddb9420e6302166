//! Page-level views assembled from fresh repository reads.
//!
//! [`ViewBuilder`] holds readers only. Every call re-reads the store; nothing
//! is cached between calls, so a view built after a notification always
//! reflects the write that caused it.

use std::sync::Arc;

use serde::Serialize;
use tournament_core::keys;
use tournament_core::views::{self, search};
use tournament_core::{
    BaselineSource, FeaturedCard, OwnershipMatch, PeriodDelta, Role, StatusCounters, Tournament,
    User,
};

use crate::config::ViewConfig;
use crate::events::Interest;
use crate::repository::{RegistrationReader, SessionReader, TournamentReader, UserReader};
use crate::storage::StorageReader;

/// Knobs for view assembly.
#[derive(Clone)]
pub struct ViewSettings {
    pub featured_limit: usize,
    pub baseline: Arc<dyn BaselineSource + Send + Sync>,
    pub ownership: OwnershipMatch,
}

impl ViewSettings {
    pub fn with_baseline(mut self, baseline: impl BaselineSource + Send + Sync + 'static) -> Self {
        self.baseline = Arc::new(baseline);
        self
    }
}

impl Default for ViewSettings {
    fn default() -> Self {
        ViewConfig::default().into()
    }
}

impl From<ViewConfig> for ViewSettings {
    fn from(config: ViewConfig) -> Self {
        Self {
            featured_limit: config.featured_limit,
            baseline: Arc::new(config.baseline),
            ownership: config.ownership,
        }
    }
}

/// Home page: counters, deltas and featured tournaments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub counters: StatusCounters,
    pub deltas: Vec<PeriodDelta>,
    pub featured: Vec<FeaturedCard>,
    pub logged_in: bool,
}

impl HomeView {
    pub fn interest() -> Interest {
        Interest::new()
            .key(keys::TOURNAMENTS)
            .key(keys::USER_DATA)
            .key(keys::AUTH_TOKEN)
    }
}

/// Profile page: the user plus tournaments they organize or joined.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub user: User,
    pub display_name: String,
    pub initials: String,
    pub owned: Vec<Tournament>,
    pub participating: Vec<Tournament>,
}

impl ProfileView {
    pub fn interest() -> Interest {
        Interest::new()
            .key(keys::USER_DATA)
            .key(keys::TOURNAMENTS)
            .prefix(keys::REGISTRATIONS_PREFIX)
    }
}

/// Dashboard header: the role from the legacy `role` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub role: Option<Role>,
    pub authenticated: bool,
}

impl DashboardView {
    pub fn interest() -> Interest {
        Interest::new().key(keys::ROLE).key(keys::AUTH_TOKEN)
    }
}

/// Builds views from fresh reads.
#[derive(Clone)]
pub struct ViewBuilder {
    users: UserReader,
    tournaments: TournamentReader,
    registrations: RegistrationReader,
    session: SessionReader,
    settings: ViewSettings,
}

impl ViewBuilder {
    pub fn new(storage: StorageReader, settings: ViewSettings) -> Self {
        Self {
            users: UserReader::new(storage.clone()),
            tournaments: TournamentReader::new(storage.clone()),
            registrations: RegistrationReader::new(storage.clone()),
            session: SessionReader::new(storage),
            settings,
        }
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn counters(&self) -> StatusCounters {
        StatusCounters::from_tournaments(&self.tournaments.list())
    }

    pub fn home(&self) -> HomeView {
        let tournaments = self.tournaments.list();
        let counters = StatusCounters::from_tournaments(&tournaments);

        HomeView {
            deltas: counters.deltas(self.settings.baseline.as_ref()),
            featured: views::featured(&tournaments, self.settings.featured_limit),
            logged_in: self.session.is_authenticated(),
            counters,
        }
    }

    pub fn profile(&self) -> ProfileView {
        let user = self.users.read();
        let tournaments = self.tournaments.list();

        let owned = views::owned_by(&tournaments, &user, self.settings.ownership);
        let participating = views::participation(&tournaments, &user.email, &self.registrations);
        tracing::debug!(
            "Participation join scanned {} tournaments for {}, matched {}",
            tournaments.len(),
            user.email,
            participating.len()
        );

        ProfileView {
            display_name: user.display_name(),
            initials: user.initials(),
            user,
            owned,
            participating,
        }
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView {
            role: self.session.role(),
            authenticated: self.session.is_authenticated(),
        }
    }

    /// Tournaments matching the home page search box.
    pub fn search(&self, term: &str) -> Vec<Tournament> {
        search(&self.tournaments.list(), term)
            .into_iter()
            .cloned()
            .collect()
    }
}
