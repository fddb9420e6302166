//! Per-tournament registration lists under `registrations_<tournamentId>`.

use std::collections::HashSet;
use std::ops::Deref;

use tournament_core::keys;
use tournament_core::{Registration, RegistrationLookup, Tournament, TournamentId};

use crate::storage::{Result, Storage, StorageReader};

/// Read access to registration lists.
#[derive(Clone)]
pub struct RegistrationReader {
    storage: StorageReader,
}

impl RegistrationReader {
    pub fn new(storage: StorageReader) -> Self {
        Self { storage }
    }

    /// Registrations of tournament `id` in stored order. Empty when absent
    /// or malformed.
    pub fn list_for(&self, id: &TournamentId) -> Vec<Registration> {
        self.storage
            .get_value(&keys::registrations_key(id))
            .map(Registration::hydrate_all)
            .unwrap_or_default()
    }

    /// Whether `email` is registered for `id`. Case-sensitive.
    pub fn is_registered(&self, id: &TournamentId, email: &str) -> bool {
        self.list_for(id).iter().any(|r| r.is_for(email))
    }

    /// Registration keys whose tournament no longer exists in `tournaments`.
    ///
    /// Diagnostic only: dangling lists are harmless and never cleaned up here.
    pub fn orphaned(&self, tournaments: &[Tournament]) -> Vec<String> {
        let known: HashSet<String> = tournaments
            .iter()
            .filter_map(|t| t.id.as_ref().map(ToString::to_string))
            .collect();

        self.storage
            .keys()
            .into_iter()
            .filter(|key| keys::registrations_suffix(key).is_some_and(|id| !known.contains(id)))
            .collect()
    }
}

impl RegistrationLookup for RegistrationReader {
    fn is_registered(&self, id: &TournamentId, email: &str) -> bool {
        RegistrationReader::is_registered(self, id, email)
    }
}

/// Read-write access to registration lists.
#[derive(Clone)]
pub struct RegistrationRepository {
    reader: RegistrationReader,
    storage: Storage,
}

impl RegistrationRepository {
    pub fn new(storage: Storage) -> Self {
        Self {
            reader: RegistrationReader::new(storage.reader()),
            storage,
        }
    }

    /// Appends `registration` to tournament `id`'s list.
    ///
    /// Returns `false` without writing when that email is already
    /// registered. The tournament itself is not required to exist.
    pub fn register(&self, id: &TournamentId, registration: Registration) -> Result<bool> {
        let mut registrations = self.reader.list_for(id);

        if let Some(email) = registration.email.as_deref()
            && registrations.iter().any(|r| r.is_for(email))
        {
            tracing::debug!("{} already registered for tournament {}", email, id);
            return Ok(false);
        }

        registrations.push(registration);
        self.storage
            .set(&keys::registrations_key(id), &registrations)?;
        Ok(true)
    }
}

impl Deref for RegistrationRepository {
    type Target = RegistrationReader;

    fn deref(&self) -> &RegistrationReader {
        &self.reader
    }
}
