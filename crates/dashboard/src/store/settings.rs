use mt_dashboard_core::{SiteSettings, keys};

use super::{StoreError, read_json, write_json};
use crate::storage::Storage;

/// Repository for site settings under [`keys::SETTINGS`].
pub struct SettingsRepository<'a, S> {
    storage: &'a S,
}

impl<'a, S: Storage> SettingsRepository<'a, S> {
    /// Create a new repository over the given storage.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Stored settings, or the defaults when none were saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the stored value is malformed.
    pub async fn load(&self) -> Result<SiteSettings, StoreError> {
        Ok(read_json(self.storage, keys::SETTINGS)
            .await?
            .unwrap_or_default())
    }

    /// Replace the stored settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn save(&self, settings: &SiteSettings) -> Result<(), StoreError> {
        write_json(self.storage, keys::SETTINGS, settings).await?;
        tracing::info!(site_title = %settings.site_title, theme = %settings.theme, "Saved site settings");
        Ok(())
    }
}
