//! Sign-in state: the `authToken` and `role` slots.

use std::ops::Deref;

use tournament_core::keys;
use tournament_core::{Role, User};

use crate::error::Result;
use crate::events::Signal;
use crate::storage::{Storage, StorageReader};

use super::user::persist_with_role;

/// Read access to the session slots.
#[derive(Clone)]
pub struct SessionReader {
    storage: StorageReader,
}

impl SessionReader {
    pub fn new(storage: StorageReader) -> Self {
        Self { storage }
    }

    /// Presence of `authToken`. The token itself is never inspected.
    pub fn is_authenticated(&self) -> bool {
        self.storage.contains(keys::AUTH_TOKEN)
    }

    /// Role from the legacy `role` key; `None` when absent or unrecognized.
    pub fn role(&self) -> Option<Role> {
        let text = self.storage.get_text(keys::ROLE)?;
        match text.parse() {
            Ok(role) => Some(role),
            Err(_) => {
                tracing::warn!("Ignoring unrecognized role '{}'", text);
                None
            }
        }
    }
}

/// Sign-in and sign-out flows.
///
/// Both persist first and then raise [`Signal::AuthChanged`] in the calling
/// tab, so same-tab listeners observe the new state when they re-read.
#[derive(Clone)]
pub struct SessionRepository {
    reader: SessionReader,
    storage: Storage,
}

impl SessionRepository {
    pub fn new(storage: Storage) -> Self {
        Self {
            reader: SessionReader::new(storage.reader()),
            storage,
        }
    }

    /// Persists `profile`, its role and `token`, then raises `AuthChanged`.
    pub fn sign_in(&self, profile: &User, token: &str) -> Result<()> {
        persist_with_role(&self.storage, profile)?;
        self.storage.set_text(keys::AUTH_TOKEN, token)?;
        self.storage.raise(Signal::AuthChanged)?;

        tracing::debug!("Signed in {} as {}", profile.email, profile.role);
        Ok(())
    }

    /// Removes `authToken` and `role`, keeping the profile, then raises
    /// `AuthChanged`.
    pub fn sign_out(&self) -> Result<()> {
        self.storage.remove(keys::AUTH_TOKEN)?;
        self.storage.remove(keys::ROLE)?;
        self.storage.raise(Signal::AuthChanged)?;

        tracing::debug!("Signed out");
        Ok(())
    }
}

impl Deref for SessionRepository {
    type Target = SessionReader;

    fn deref(&self) -> &SessionReader {
        &self.reader
    }
}
