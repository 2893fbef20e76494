use mt_dashboard_core::{Role, SessionRecord, keys};

use super::{StoreError, read_json, write_json};
use crate::storage::Storage;

/// Repository for the signed-in user under [`keys::CURRENT_USER`].
pub struct CurrentUserRepository<'a, S> {
    storage: &'a S,
}

impl<'a, S: Storage> CurrentUserRepository<'a, S> {
    /// Create a new repository over the given storage.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// The signed-in user, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored value is malformed.
    pub async fn get(&self) -> Result<Option<SessionRecord>, StoreError> {
        read_json(self.storage, keys::CURRENT_USER).await
    }

    /// Record `session` as the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn set(&self, session: &SessionRecord) -> Result<(), StoreError> {
        write_json(self.storage, keys::CURRENT_USER, session).await
    }

    /// Sign out. Clearing an absent session is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove_item(keys::CURRENT_USER).await?;
        Ok(())
    }

    /// Role of the signed-in user.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    pub async fn current_role(&self) -> Result<Option<Role>, StoreError> {
        Ok(self.get().await?.map(|session| session.role))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_set_get_clear() {
        let storage = MemoryStorage::new();
        let repo = CurrentUserRepository::new(&storage);
        assert_eq!(repo.current_role().await.unwrap(), None);

        repo.set(&SessionRecord::builtin_super_admin()).await.unwrap();
        assert_eq!(
            storage.get_item(keys::CURRENT_USER).await.unwrap().as_deref(),
            Some(r#"{"email":"admin@mt.com","role":"Super Admin"}"#)
        );
        assert_eq!(repo.current_role().await.unwrap(), Some(Role::SuperAdmin));

        repo.clear().await.unwrap();
        assert_eq!(repo.get().await.unwrap(), None);
        repo.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_reads_legacy_role_spelling() {
        let storage = MemoryStorage::with_items([(
            keys::CURRENT_USER,
            r#"{"email":"admin@mt.com","role":"SuperAdmin"}"#,
        )]);
        let repo = CurrentUserRepository::new(&storage);
        assert_eq!(repo.current_role().await.unwrap(), Some(Role::SuperAdmin));
    }
}
