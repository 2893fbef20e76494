//! Authentication route handlers.
//!
//! Login checks the built-in credential and then the directory; the result
//! is stored in the visitor's session. Password reset only validates the
//! address and acknowledges the request; no email is sent.

use std::sync::LazyLock;

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use regex::Regex;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user};
use crate::filters;
use crate::middleware::OptionalSession;
use crate::services::AuthService;
use crate::state::AppState;
use crate::store::CurrentUserRepository;

use super::render_or_log;

/// Shown when login fails.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password. Please try again.";
/// Shown when the reset form is submitted empty.
pub const EMAIL_REQUIRED: &str = "Email address is required.";
/// Shown when the reset address is malformed.
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
/// Shown once a reset request has been accepted.
pub const RESET_LINK_SENT: &str = "If an account with that email exists, a reset link has been sent.";

/// Shape check for reset addresses: something@something.something, no spaces.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub error: Option<String>,
    pub signed_in_as: Option<String>,
}

/// Forgot password page template.
#[derive(Template)]
#[template(path = "auth/forgot_password.html")]
pub struct ForgotPasswordTemplate {
    pub email: String,
    pub error: Option<String>,
    pub message: Option<String>,
}

// =============================================================================
// Forms
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordForm {
    #[serde(default)]
    pub email: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", axum::routing::post(logout))
        .route(
            "/forgot-password",
            get(forgot_password_page).post(forgot_password),
        )
}

/// Render the login page.
///
/// GET /login
async fn login_page(OptionalSession(session): OptionalSession) -> Html<String> {
    let template = LoginTemplate {
        email: String::new(),
        error: None,
        signed_in_as: session.map(|s| s.email),
    };
    Html(render_or_log(&template))
}

/// Check credentials and start a session.
///
/// POST /login
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.storage());

    if auth
        .login(&session, &form.email, &form.password)
        .await?
        .is_some()
    {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let template = LoginTemplate {
        email: form.email,
        error: Some(INVALID_CREDENTIALS.to_string()),
        signed_in_as: None,
    };
    Ok((StatusCode::UNAUTHORIZED, Html(render_or_log(&template))).into_response())
}

/// End the session. Always lands on the landing page.
///
/// POST /logout
async fn logout(session: Session) -> Redirect {
    if let Err(e) = CurrentUserRepository::new(&session).clear().await {
        tracing::warn!(error = %e, "Failed to clear session on logout");
    }
    clear_sentry_user();
    Redirect::to("/")
}

/// Render the forgot password page.
///
/// GET /forgot-password
async fn forgot_password_page() -> Html<String> {
    let template = ForgotPasswordTemplate {
        email: String::new(),
        error: None,
        message: None,
    };
    Html(render_or_log(&template))
}

/// Validate the address, wait, and acknowledge.
///
/// POST /forgot-password
#[instrument(skip_all)]
async fn forgot_password(
    State(state): State<AppState>,
    Form(form): Form<ForgotPasswordForm>,
) -> Response {
    if let Err(message) = validate_reset_email(&form.email) {
        let template = ForgotPasswordTemplate {
            email: form.email,
            error: Some(message.to_string()),
            message: None,
        };
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render_or_log(&template)),
        )
            .into_response();
    }

    tokio::time::sleep(state.config().reset_delay).await;
    tracing::info!("Password reset requested");

    let template = ForgotPasswordTemplate {
        email: String::new(),
        error: None,
        message: Some(RESET_LINK_SENT.to_string()),
    };
    Html(render_or_log(&template)).into_response()
}

/// Check a reset address, returning the message to show on failure.
fn validate_reset_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() {
        return Err(EMAIL_REQUIRED);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(EMAIL_INVALID);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reset_email() {
        assert_eq!(validate_reset_email(""), Err(EMAIL_REQUIRED));
        assert_eq!(validate_reset_email("sokha"), Err(EMAIL_INVALID));
        assert_eq!(validate_reset_email("sokha@mt"), Err(EMAIL_INVALID));
        assert_eq!(validate_reset_email("so kha@mt.com"), Err(EMAIL_INVALID));
        assert_eq!(validate_reset_email("sokha@mt.com"), Ok(()));
    }

    #[test]
    fn test_validate_reset_email_checks_raw_input() {
        assert_eq!(validate_reset_email("   "), Err(EMAIL_INVALID));
        assert_eq!(validate_reset_email(" sokha@mt.com"), Err(EMAIL_INVALID));
        assert_eq!(validate_reset_email("sokha@mt.com "), Err(EMAIL_INVALID));
    }
}
