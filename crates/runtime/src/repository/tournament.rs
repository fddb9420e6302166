//! Tournament collection repository.

use std::ops::Deref;

use tournament_core::keys;
use tournament_core::tournament;
use tournament_core::{Tournament, TournamentId, TournamentStatus};

use crate::storage::{Result, Storage, StorageError, StorageReader};

/// Read access to the ordered tournament collection.
#[derive(Clone)]
pub struct TournamentReader {
    storage: StorageReader,
}

impl TournamentReader {
    pub fn new(storage: StorageReader) -> Self {
        Self { storage }
    }

    /// Full collection in stored order. Empty when absent or malformed;
    /// non-object entries are skipped.
    pub fn list(&self) -> Vec<Tournament> {
        self.storage
            .get_value(keys::TOURNAMENTS)
            .map(Tournament::hydrate_all)
            .unwrap_or_default()
    }

    pub fn by_status(&self, status: TournamentStatus) -> Vec<Tournament> {
        tournament::by_status(&self.list(), status).cloned().collect()
    }

    /// Tournaments whose `organizerName` equals `name` exactly.
    pub fn by_organizer_name(&self, name: &str) -> Vec<Tournament> {
        tournament::by_organizer_name(&self.list(), name)
            .cloned()
            .collect()
    }

    pub fn find(&self, id: &TournamentId) -> Option<Tournament> {
        tournament::find(&self.list(), id).cloned()
    }
}

/// Read-write access to the tournament collection.
///
/// Tournaments are created elsewhere; this is the write entry point that
/// flow hands its collection to.
#[derive(Clone)]
pub struct TournamentRepository {
    reader: TournamentReader,
    storage: Storage,
}

impl TournamentRepository {
    pub fn new(storage: Storage) -> Self {
        Self {
            reader: TournamentReader::new(storage.reader()),
            storage,
        }
    }

    /// Replaces the whole collection. Rejects collections with duplicate ids
    /// without writing anything.
    pub fn replace_all(&self, tournaments: &[Tournament]) -> Result<()> {
        if let Some(id) = tournament::duplicate_id(tournaments) {
            return Err(StorageError::DuplicateTournamentId(id.to_string()));
        }
        self.storage.set(keys::TOURNAMENTS, tournaments)?;
        tracing::debug!("Stored {} tournaments", tournaments.len());
        Ok(())
    }

    /// Appends one tournament to the stored collection.
    pub fn append(&self, tournament: Tournament) -> Result<()> {
        let mut tournaments = self.reader.list();
        tournaments.push(tournament);
        self.replace_all(&tournaments)
    }
}

impl Deref for TournamentRepository {
    type Target = TournamentReader;

    fn deref(&self) -> &TournamentReader {
        &self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::events::ChangeBus;
    use crate::storage::InMemoryStore;

    fn repository(store: InMemoryStore) -> TournamentRepository {
        let bus = ChangeBus::new();
        let tab = bus.register_tab();
        TournamentRepository::new(Storage::new(Arc::new(store), bus, tab))
    }

    #[test]
    fn test_list_empty_when_malformed() {
        let tournaments = repository(InMemoryStore::with_entries([(keys::TOURNAMENTS, "[{")]));
        assert!(tournaments.list().is_empty());

        let tournaments = repository(InMemoryStore::with_entries([(keys::TOURNAMENTS, "{}")]));
        assert!(tournaments.list().is_empty());
    }

    #[test]
    fn test_queries() {
        let tournaments = repository(InMemoryStore::new());
        tournaments
            .replace_all(&[
                Tournament::new(1, "Open")
                    .with_status(TournamentStatus::Active)
                    .with_organizer("Anna Admin", None),
                Tournament::new(2, "Blitz").with_status(TournamentStatus::Upcoming),
            ])
            .unwrap();

        assert_eq!(tournaments.list().len(), 2);
        assert_eq!(tournaments.by_status(TournamentStatus::Active).len(), 1);
        assert_eq!(tournaments.by_organizer_name("Anna Admin").len(), 1);
        assert!(tournaments.by_organizer_name("anna admin").is_empty());
        assert_eq!(
            tournaments.find(&TournamentId::Number(2)).unwrap().name.as_deref(),
            Some("Blitz")
        );
        assert!(tournaments.find(&TournamentId::from("2")).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let tournaments = repository(InMemoryStore::new());
        tournaments.append(Tournament::new(5, "First")).unwrap();

        let err = tournaments.append(Tournament::new(5, "Again")).unwrap_err();
        assert!(matches!(err, StorageError::DuplicateTournamentId(ref id) if id == "5"));
        assert_eq!(tournaments.list().len(), 1);
    }
}
