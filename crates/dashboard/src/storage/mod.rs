//! Key/value storage standing in for browser local storage.
//!
//! Every piece of dashboard state is a JSON string under a fixed key (see
//! [`mt_dashboard_core::keys`]). The [`Storage`] trait is the only way the
//! repositories in [`crate::store`] reach that state, so the backend can be
//! swapped:
//!
//! - [`SqliteStorage`] - the shared store used by the server and the CLI
//! - [`MemoryStorage`] - an in-process map for tests
//! - [`tower_sessions::Session`] - per-visitor storage, used for `currentUser`

mod memory;
mod session;
mod sqlite;

use std::future::Future;

use thiserror::Error;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The `SQLite` backend failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The session backend failed to load or save.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// A string-keyed, string-valued store.
///
/// Values are written and read whole. Implementations do not lock across a
/// read followed by a write, so concurrent writers race and the last one wins.
pub trait Storage: Send + Sync {
    /// Returns the value under `key`, or `None` if it was never set.
    fn get_item(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replaces the value under `key`.
    fn set_item(
        &self,
        key: &str,
        value: String,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}
