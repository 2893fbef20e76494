//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                             - Landing page
//!
//! # Auth
//! GET  /login                        - Login form
//! POST /login                        - Check credentials, start session
//! POST /logout                       - End session
//! GET  /forgot-password              - Reset request form
//! POST /forgot-password              - Validate and acknowledge a reset request
//!
//! # Dashboard (signed in)
//! GET  /dashboard                    - Overview
//! GET  /dashboard/profile            - Owner profile
//! GET  /dashboard/users              - Directory
//! POST /dashboard/users              - Add record (admin)
//! GET  /dashboard/users/{id}/edit    - Edit form (admin)
//! POST /dashboard/users/{id}/edit    - Save record (admin)
//! POST /dashboard/users/{id}/role    - Change role (super admin)
//! POST /dashboard/users/{id}/delete  - Remove record (super admin)
//! GET  /dashboard/settings           - Site settings
//! POST /dashboard/settings           - Save site settings
//! GET  /dashboard/services           - Placeholder
//! ```

use axum::{Router, response::Redirect};
use serde::Deserialize;

use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod home;
pub mod profile;
pub mod services;
pub mod settings;
pub mod users;

pub use dashboard::{SiteView, ViewerView};

/// Build all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(home::router())
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(profile::router())
        .merge(users::router())
        .merge(settings::router())
        .merge(services::router())
}

/// One-shot messages carried in the query string after a redirect.
#[derive(Debug, Default, Deserialize)]
pub struct FlashParams {
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Redirect to `path` with a `?success=` message.
pub(crate) fn redirect_success(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{path}?success={}", urlencoding::encode(message)))
}

/// Redirect to `path` with an `?error=` message.
pub(crate) fn redirect_error(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{path}?error={}", urlencoding::encode(message)))
}

/// Log a render failure and fall back to a plain body.
pub(crate) fn render_or_log<T: askama::Template>(template: &T) -> String {
    template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn test_redirect_encodes_message() {
        let response = redirect_success("/dashboard/settings", "Settings saved!").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/dashboard/settings?success=Settings%20saved%21"
        );
    }
}
