//! Authentication extractors.
//!
//! The signed-in user is the `currentUser` record in the visitor's session.
//! Dashboard pages use [`RequireSession`]; directory mutations use
//! [`RequireEditor`] or [`RequireSuperAdmin`], which answer 403 when the
//! role is insufficient.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use mt_dashboard_core::{Permission, SessionRecord};
use tower_sessions::Session;

use crate::error::set_sentry_user;
use crate::store::CurrentUserRepository;

/// Error returned when a request lacks the required session or role.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to the login page.
    RedirectToLogin,
    /// No session layer is installed.
    Unauthorized,
    /// Signed in, but the role does not allow this.
    Forbidden(&'static str),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, message).into_response(),
        }
    }
}

/// Read the signed-in user from the request's session.
///
/// A corrupt `currentUser` value is treated as signed out.
async fn session_record(parts: &Parts) -> Result<Option<SessionRecord>, AuthRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AuthRejection::Unauthorized)?;

    match CurrentUserRepository::new(session).get().await {
        Ok(record) => Ok(record),
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable session, treating as signed out");
            Ok(None)
        }
    }
}

async fn require_permission(
    parts: &Parts,
    permission: Permission,
    message: &'static str,
) -> Result<SessionRecord, AuthRejection> {
    let record = session_record(parts)
        .await?
        .ok_or(AuthRejection::RedirectToLogin)?;

    if !record.role.allows(permission) {
        tracing::warn!(
            email = %record.email,
            role = %record.role,
            ?permission,
            "Permission denied"
        );
        return Err(AuthRejection::Forbidden(message));
    }

    Ok(record)
}

/// Extractor that requires a signed-in user.
///
/// Anonymous visitors are redirected to `/login`.
pub struct RequireSession(pub SessionRecord);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let record = session_record(parts)
            .await?
            .ok_or(AuthRejection::RedirectToLogin)?;
        set_sentry_user(&record.email);
        Ok(Self(record))
    }
}

/// Extractor that optionally gets the signed-in user.
pub struct OptionalSession(pub Option<SessionRecord>);

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_record(parts).await.ok().flatten()))
    }
}

/// Extractor that requires a role allowed to create and edit records
/// (Admin or Super Admin).
pub struct RequireEditor(pub SessionRecord);

impl<S> FromRequestParts<S> for RequireEditor
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_permission(
            parts,
            Permission::EditUser,
            "Only admins can change directory records",
        )
        .await
        .map(Self)
    }
}

/// Extractor that requires a role allowed to change site settings.
pub struct RequireSettingsManager(pub SessionRecord);

impl<S> FromRequestParts<S> for RequireSettingsManager
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_permission(
            parts,
            Permission::ManageSettings,
            "Only admins can change site settings",
        )
        .await
        .map(Self)
    }
}

/// Extractor that requires the Super Admin role.
pub struct RequireSuperAdmin(pub SessionRecord);

impl<S> FromRequestParts<S> for RequireSuperAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_permission(
            parts,
            Permission::DeleteUser,
            "Only super admins can access this resource",
        )
        .await
        .map(Self)
    }
}
