//! Stateless derived views over repository snapshots.
//!
//! Nothing here is cached or persisted: callers read fresh snapshots and
//! recompute on every notification.
//!
//! - [`stats`]: status counters, player totals and period deltas
//! - [`featured`]: the first N tournaments as display cards
//! - [`joins`]: participation (via registrations) and ownership
//! - [`search`]: free-text filtering

pub mod featured;
pub mod joins;
pub mod search;
pub mod stats;

pub use featured::{DEFAULT_FEATURED_LIMIT, FeaturedCard, featured};
pub use joins::{OwnershipMatch, RegistrationLookup, owned_by, participation};
pub use search::search;
pub use stats::{BaselineSource, FixedBaseline, Metric, PeriodDelta, StatusCounters};
