//! Credential checking and login.
//!
//! Credentials are compared in plaintext: first against the built-in
//! super admin pair, then against each directory record in order.

use mt_dashboard_core::{SessionRecord, keys};

use crate::storage::Storage;
use crate::store::{CurrentUserRepository, DirectoryRepository, StoreError};

/// Authenticates against the directory in `directory` storage.
pub struct AuthService<'a, D> {
    directory: DirectoryRepository<'a, D>,
}

impl<'a, D: Storage> AuthService<'a, D> {
    /// Create a service reading records from `directory`.
    #[must_use]
    pub const fn new(directory: &'a D) -> Self {
        Self {
            directory: DirectoryRepository::new(directory),
        }
    }

    /// Check `identifier` / `secret`.
    ///
    /// The built-in pair always yields a Super Admin session. Otherwise the
    /// first directory record with an equal email and password wins, and its
    /// role becomes the session role.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub async fn authenticate(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<Option<SessionRecord>, StoreError> {
        if identifier == keys::BUILTIN_SUPER_ADMIN_EMAIL
            && secret == keys::BUILTIN_SUPER_ADMIN_PASSWORD
        {
            return Ok(Some(SessionRecord::builtin_super_admin()));
        }

        let record = self.directory.find_by_credentials(identifier, secret).await?;
        Ok(record.as_ref().map(SessionRecord::from))
    }

    /// Authenticate and, on success, record the session in `session`.
    ///
    /// On failure `session` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or the session
    /// cannot be written.
    pub async fn login<S: Storage>(
        &self,
        session: &S,
        identifier: &str,
        secret: &str,
    ) -> Result<Option<SessionRecord>, StoreError> {
        let Some(record) = self.authenticate(identifier, secret).await? else {
            tracing::warn!(email = %identifier, "Failed login attempt");
            return Ok(None);
        };

        CurrentUserRepository::new(session).set(&record).await?;
        tracing::info!(email = %record.email, role = %record.role, "User logged in");
        Ok(Some(record))
    }
}
