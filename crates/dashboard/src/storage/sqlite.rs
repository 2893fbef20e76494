use sqlx::SqlitePool;

use super::{Storage, StorageError};

/// Storage in the `local_storage` table.
///
/// Shared by every visitor of the server and by the CLI.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Wrap a pool whose database has been migrated.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List the keys currently set, in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM local_storage ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}

impl Storage for SqliteStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value =
            sqlx::query_scalar::<_, String>("SELECT value FROM local_storage WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO local_storage (key, value)
            VALUES (?1, ?2)
            ON CONFLICT (key) DO UPDATE
            SET value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::db;

    async fn storage() -> SqliteStorage {
        let pool = db::create_pool(&SecretString::from("sqlite::memory:"))
            .await
            .unwrap();
        db::migrate(&pool).await.unwrap();
        SqliteStorage::new(pool)
    }

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let storage = storage().await;
        storage.set_item("users", "[]".to_owned()).await.unwrap();
        storage
            .set_item("users", r#"[{"id":1}]"#.to_owned())
            .await
            .unwrap();

        assert_eq!(
            storage.get_item("users").await.unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert_eq!(storage.keys().await.unwrap(), vec!["users".to_owned()]);
    }

    #[tokio::test]
    async fn test_remove_missing_key() {
        let storage = storage().await;
        storage.remove_item("currentUser").await.unwrap();
        assert_eq!(storage.get_item("currentUser").await.unwrap(), None);
    }
}
