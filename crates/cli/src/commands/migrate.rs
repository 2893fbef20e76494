//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! mt-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_DATABASE_URL` - `SQLite` URL (default: `sqlite://mt-dashboard.db`)

use mt_dashboard::config::DashboardConfig;
use mt_dashboard::db;

use super::CliError;

/// Create or update the storage tables.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let config = DashboardConfig::from_env()?;

    tracing::info!("Connecting to dashboard database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running dashboard migrations...");
    db::migrate(&pool).await?;

    tracing::info!("Dashboard migrations complete!");
    Ok(())
}
