//! CLI command implementations.

pub mod migrate;
pub mod session;
pub mod user;

use mt_dashboard::config::{ConfigError, DashboardConfig};
use mt_dashboard::db;
use mt_dashboard::storage::SqliteStorage;
use mt_dashboard::store::StoreError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migrations failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A store operation failed or was refused.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// `user edit` was given nothing to change.
    #[error("Nothing to update: pass at least one of --name, --email, --password, --status")]
    EmptyPatch,

    /// Login failed.
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Load configuration, connect, migrate, and return the shared storage.
///
/// # Errors
///
/// Returns an error if configuration, connection or migration fails.
pub async fn connect() -> Result<SqliteStorage, CliError> {
    let config = DashboardConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::migrate(&pool).await?;
    Ok(SqliteStorage::new(pool))
}
