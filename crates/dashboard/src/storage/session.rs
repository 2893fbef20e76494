use tower_sessions::Session;

use super::{Storage, StorageError};

/// Each visitor's cookie-bound session is their own local storage, so the
/// signed-in user is per browser while the directory is shared.
impl Storage for Session {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get::<String>(key).await?)
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.insert(key, value).await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.remove::<String>(key).await?;
        Ok(())
    }
}
