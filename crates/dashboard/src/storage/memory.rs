use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{Storage, StorageError};

/// In-process storage backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `items`.
    #[must_use]
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: RwLock::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.items.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("users").await.unwrap(), None);

        storage.set_item("users", "[]".to_owned()).await.unwrap();
        assert_eq!(storage.get_item("users").await.unwrap().as_deref(), Some("[]"));

        storage.remove_item("users").await.unwrap();
        assert_eq!(storage.get_item("users").await.unwrap(), None);

        // Removing twice is fine.
        storage.remove_item("users").await.unwrap();
    }

    #[tokio::test]
    async fn test_with_items() {
        let storage = MemoryStorage::with_items([("settings", "{}")]);
        assert_eq!(
            storage.get_item("settings").await.unwrap().as_deref(),
            Some("{}")
        );
    }
}
