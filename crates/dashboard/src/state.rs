//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::DashboardConfig;
use crate::storage::SqliteStorage;

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    pool: SqlitePool,
    storage: SqliteStorage,
}

impl AppState {
    /// Create state over a migrated pool.
    #[must_use]
    pub fn new(config: DashboardConfig, pool: SqlitePool) -> Self {
        let storage = SqliteStorage::new(pool.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                storage,
            }),
        }
    }

    /// Get the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get the database pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Shared storage holding the directory and site settings.
    #[must_use]
    pub fn storage(&self) -> &SqliteStorage {
        &self.inner.storage
    }
}
