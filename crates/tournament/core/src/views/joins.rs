//! Joins between the user profile, tournaments and registrations.

use crate::tournament::{Tournament, TournamentId};
use crate::user::User;

/// Registration membership test used by the participation join.
///
/// Implemented by the runtime's registration repository; closures work too.
pub trait RegistrationLookup {
    fn is_registered(&self, id: &TournamentId, email: &str) -> bool;
}

impl<F> RegistrationLookup for F
where
    F: Fn(&TournamentId, &str) -> bool,
{
    fn is_registered(&self, id: &TournamentId, email: &str) -> bool {
        self(id, email)
    }
}

/// Tournaments `email` is registered in, in stored order.
///
/// One lookup per tournament, so the cost grows with tournaments ×
/// registrations per tournament. Tournaments without an id cannot have
/// registrations and are skipped.
pub fn participation<L: RegistrationLookup + ?Sized>(
    tournaments: &[Tournament],
    email: &str,
    lookup: &L,
) -> Vec<Tournament> {
    tournaments
        .iter()
        .filter(|tournament| {
            tournament
                .id
                .as_ref()
                .is_some_and(|id| lookup.is_registered(id, email))
        })
        .cloned()
        .collect()
}

/// How tournament ownership is decided.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum OwnershipMatch {
    /// Only `organizerEmail == user.email`.
    Identifier,
    /// Identifier when the tournament has one, legacy name match otherwise.
    #[default]
    PreferIdentifier,
    /// Only `organizerName == "first last"`. Name collisions misattribute
    /// tournaments.
    LegacyName,
}

impl OwnershipMatch {
    pub fn is_owner(self, tournament: &Tournament, user: &User) -> bool {
        let by_identifier = || tournament.organizer_email.as_deref() == Some(user.email.as_str());
        let by_name = || tournament.organizer_name.as_deref() == Some(user.display_name().as_str());

        match self {
            OwnershipMatch::Identifier => by_identifier(),
            OwnershipMatch::PreferIdentifier => match tournament.organizer_email {
                Some(_) => by_identifier(),
                None => by_name(),
            },
            OwnershipMatch::LegacyName => by_name(),
        }
    }
}

/// Tournaments organized by `user`, in stored order.
pub fn owned_by(tournaments: &[Tournament], user: &User, policy: OwnershipMatch) -> Vec<Tournament> {
    tournaments
        .iter()
        .filter(|tournament| policy.is_owner(tournament, user))
        .cloned()
        .collect()
}
