//! Profile repository over `userData` and the legacy `role` key.

use std::ops::Deref;

use tournament_core::keys;
use tournament_core::{User, UserPatch};

use crate::storage::{Result, Storage, StorageReader};

/// Read access to the singleton profile.
#[derive(Clone)]
pub struct UserReader {
    storage: StorageReader,
}

impl UserReader {
    pub fn new(storage: StorageReader) -> Self {
        Self { storage }
    }

    /// The stored profile, fully hydrated. Defaults when absent or malformed.
    pub fn read(&self) -> User {
        self.storage
            .get_value(keys::USER_DATA)
            .map(User::hydrate)
            .unwrap_or_default()
    }

    /// Whether a profile record is stored at all.
    pub fn exists(&self) -> bool {
        self.storage.contains(keys::USER_DATA)
    }
}

/// Read-write access to the singleton profile.
#[derive(Clone)]
pub struct UserRepository {
    reader: UserReader,
    storage: Storage,
}

impl UserRepository {
    pub fn new(storage: Storage) -> Self {
        Self {
            reader: UserReader::new(storage.reader()),
            storage,
        }
    }

    /// Shallow-merges `patch` onto the stored profile and persists the whole
    /// merged record.
    ///
    /// A patch carrying `role` also rewrites the legacy `role` key. Returns
    /// the record as persisted.
    pub fn write(&self, patch: UserPatch) -> Result<User> {
        let role = patch.role;
        let mut user = self.reader.read();
        user.apply(patch);

        if role.is_some() {
            persist_with_role(&self.storage, &user)?;
        } else {
            self.storage.set(keys::USER_DATA, &user)?;
        }

        tracing::debug!("Updated profile for {}", user.email);
        Ok(user)
    }

    /// Persists `user` as the whole profile record, keeping `role` in sync.
    pub fn replace(&self, user: &User) -> Result<()> {
        persist_with_role(&self.storage, user)
    }
}

/// Writes `userData` and then `role`. When the `role` write fails the
/// previous `userData` is put back, so the two keys never disagree.
pub(crate) fn persist_with_role(storage: &Storage, user: &User) -> Result<()> {
    let previous = storage.get_text(keys::USER_DATA);
    storage.set(keys::USER_DATA, user)?;

    if let Err(err) = storage.set_text(keys::ROLE, user.role.as_ref()) {
        let restored = match previous {
            Some(text) => storage.set_text(keys::USER_DATA, &text),
            None => storage.remove(keys::USER_DATA).map(|_| ()),
        };
        if let Err(rollback) = restored {
            tracing::warn!("Failed to restore profile after role write failed: {}", rollback);
        }
        return Err(err);
    }
    Ok(())
}

impl Deref for UserRepository {
    type Target = UserReader;

    fn deref(&self) -> &UserReader {
        &self.reader
    }
}
