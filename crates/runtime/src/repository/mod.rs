//! Entity repositories over the storage adapter.
//!
//! Each entity has a read-only `*Reader` and a read-write `*Repository`
//! that derefs to it. View assembly only ever holds readers, so code
//! reacting to a notification cannot write the key it reacts to.

mod registration;
mod session;
mod tournament;
mod user;

pub use registration::{RegistrationReader, RegistrationRepository};
pub use session::{SessionReader, SessionRepository};
pub use tournament::{TournamentReader, TournamentRepository};
pub use user::{UserReader, UserRepository};
