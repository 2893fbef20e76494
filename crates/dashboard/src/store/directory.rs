use mt_dashboard_core::{NewUser, Role, UserId, UserPatch, UserRecord, keys};

use super::{StoreError, read_json, write_json};
use crate::storage::Storage;

/// Counts shown on the dashboard overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryStats {
    pub total: usize,
    pub active: usize,
    /// Records with the Admin or Super Admin role.
    pub admins: usize,
}

impl DirectoryStats {
    fn from_records(records: &[UserRecord]) -> Self {
        Self {
            total: records.len(),
            active: records.iter().filter(|r| r.status.is_active()).count(),
            admins: records
                .iter()
                .filter(|r| matches!(r.role, Role::Admin | Role::SuperAdmin))
                .count(),
        }
    }
}

/// Repository for the user directory under [`keys::USERS`].
pub struct DirectoryRepository<'a, S> {
    storage: &'a S,
}

impl<'a, S: Storage> DirectoryRepository<'a, S> {
    /// Create a new repository over the given storage.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Load the directory, seeding an empty list if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored value is not a list of
    /// records, or a storage error.
    pub async fn load(&self) -> Result<Vec<UserRecord>, StoreError> {
        if let Some(records) = self.read().await? {
            return Ok(records);
        }

        tracing::debug!("Seeding empty directory");
        let records = Vec::new();
        self.save(&records).await?;
        Ok(records)
    }

    /// Load the directory without seeding it. Absent reads as empty.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub async fn peek(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.read().await?.unwrap_or_default())
    }

    /// Replace the whole directory with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn save(&self, records: &[UserRecord]) -> Result<(), StoreError> {
        write_json(self.storage, keys::USERS, records).await
    }

    /// Find a record by id.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub async fn find(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.load().await?.into_iter().find(|r| r.id == id))
    }

    /// First record whose email and password both match.
    ///
    /// Records without a password never match.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .peek()
            .await?
            .into_iter()
            .find(|r| r.matches_credentials(email, password)))
    }

    /// Append a record, assigning it the next id.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`], plus write failures.
    pub async fn create(&self, new_user: NewUser) -> Result<UserRecord, StoreError> {
        let mut records = self.load().await?;
        let id = next_id(&records);
        let record = new_user.into_record(id);
        records.push(record.clone());
        self.save(&records).await?;

        tracing::info!(user_id = %id, email = %record.email, "Created directory record");
        Ok(record)
    }

    /// Set the role of every record with `id`.
    ///
    /// Ids are not guaranteed unique; the first match decides protection and
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id and
    /// [`StoreError::ProtectedSuperAdmin`] when moving a Super Admin to
    /// another role. Nothing is written in either case.
    pub async fn update_role(&self, id: UserId, role: Role) -> Result<UserRecord, StoreError> {
        let mut records = self.load().await?;
        let first = records
            .iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if first.is_super_admin() && role != Role::SuperAdmin {
            return Err(StoreError::ProtectedSuperAdmin(id));
        }

        let mut updated = first.clone();
        updated.role = role;
        for record in records.iter_mut().filter(|r| r.id == id) {
            record.role = role;
        }
        self.save(&records).await?;

        tracing::info!(user_id = %id, role = %role, "Updated role");
        Ok(updated)
    }

    /// Apply `patch` to every record with `id`, returning the first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id.
    pub async fn update_fields(
        &self,
        id: UserId,
        patch: &UserPatch,
    ) -> Result<UserRecord, StoreError> {
        let mut records = self.load().await?;
        let mut updated = None;
        for record in records.iter_mut().filter(|r| r.id == id) {
            patch.apply(record);
            updated.get_or_insert_with(|| record.clone());
        }
        let updated = updated.ok_or(StoreError::NotFound(id))?;
        self.save(&records).await?;

        tracing::info!(user_id = %id, "Updated directory record");
        Ok(updated)
    }

    /// Remove every record with `id` and return the first of them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for an unknown id and
    /// [`StoreError::ProtectedSuperAdmin`] when the first match is a Super
    /// Admin.
    pub async fn delete(&self, id: UserId) -> Result<UserRecord, StoreError> {
        let mut records = self.load().await?;
        let removed = records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;

        if removed.is_super_admin() {
            return Err(StoreError::ProtectedSuperAdmin(id));
        }

        records.retain(|r| r.id != id);
        self.save(&records).await?;

        tracing::info!(user_id = %id, email = %removed.email, "Deleted directory record");
        Ok(removed)
    }

    /// Totals for the overview page.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub async fn stats(&self) -> Result<DirectoryStats, StoreError> {
        Ok(DirectoryStats::from_records(&self.load().await?))
    }

    async fn read(&self) -> Result<Option<Vec<UserRecord>>, StoreError> {
        read_json(self.storage, keys::USERS).await
    }
}

fn next_id(records: &[UserRecord]) -> UserId {
    records
        .iter()
        .map(|r| r.id.as_i32())
        .max()
        .map_or(UserId::new(1), |max| UserId::new(max.saturating_add(1)))
}
