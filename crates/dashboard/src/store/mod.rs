//! Typed repositories over [`Storage`].
//!
//! Each repository owns one key and treats its value as a single JSON blob:
//! every mutation reads the whole value, changes it in memory and writes the
//! whole value back. There is no locking and no versioning.

mod directory;
mod session;
mod settings;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use mt_dashboard_core::UserId;

use crate::storage::{Storage, StorageError};

pub use directory::{DirectoryRepository, DirectoryStats};
pub use session::CurrentUserRepository;
pub use settings::SettingsRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The value under a key is not valid JSON for its type.
    ///
    /// Corrupt values are reported, never repaired.
    #[error("corrupt value under `{key}`: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// No record has the given id.
    #[error("user {0} not found")]
    NotFound(UserId),

    /// The Super Admin record cannot be deleted or given another role.
    #[error("the Super Admin record is protected")]
    ProtectedSuperAdmin(UserId),
}

/// Read and decode the value under `key`. `Ok(None)` means the key is unset.
async fn read_json<S, T>(storage: &S, key: &'static str) -> Result<Option<T>, StoreError>
where
    S: Storage,
    T: DeserializeOwned,
{
    let Some(raw) = storage.get_item(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Corrupt { key, source })
}

/// Encode `value` and write it under `key`, replacing what was there.
async fn write_json<S, T>(storage: &S, key: &'static str, value: &T) -> Result<(), StoreError>
where
    S: Storage,
    T: Serialize + Sync + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(StoreError::Serialization)?;
    storage.set_item(key, raw).await?;
    Ok(())
}
