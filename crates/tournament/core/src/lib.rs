//! Record shapes and derived views for the local-first tournament store.
//!
//! `tournament-core` defines the canonical persisted records (the user
//! profile, tournaments and registrations), the key namespace they live
//! under, and the pure functions that derive statistics and joins from
//! repository snapshots. Nothing here touches storage: the `runtime` crate
//! reads fresh snapshots and hands them to [`views`].
//!
//! Every record is hydrated from loosely shaped JSON through an explicit
//! step that applies per-field defaults, so consumers never see a missing
//! field.
pub mod keys;
pub mod registration;
pub mod tournament;
pub mod user;
pub mod views;

mod hydrate;

pub use registration::Registration;
pub use tournament::{Tournament, TournamentId, TournamentStatus};
pub use user::{Role, User, UserPatch};
pub use views::{
    BaselineSource, FeaturedCard, FixedBaseline, Metric, OwnershipMatch, PeriodDelta,
    RegistrationLookup, StatusCounters,
};
