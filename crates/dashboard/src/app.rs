//! Router assembly.
//!
//! The binary and the integration tests build the same router here; the
//! binary adds the Sentry layers on top.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use sqlx::SqlitePool;
use thiserror::Error;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::config::DashboardConfig;
use crate::db;
use crate::middleware::{create_session_layer, create_session_store};
use crate::routes;
use crate::state::AppState;

/// Errors raised while preparing the application.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Migrate `pool` and build the full application router.
///
/// # Errors
///
/// Returns an error if migrations or the session table setup fail.
pub async fn build(config: DashboardConfig, pool: SqlitePool) -> Result<Router, SetupError> {
    db::migrate(&pool).await?;
    let session_store = create_session_store(&pool).await?;
    let session_layer = create_session_layer(session_store, &config);
    let static_dir = config.static_dir.clone();

    let state = AppState::new(config, pool);

    let router = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state);

    Ok(router)
}

async fn health() -> &'static str {
    "ok"
}

async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
