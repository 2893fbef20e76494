//! Directory management route handlers.
//!
//! Everyone signed in can list the directory. Admins and super admins can
//! add and edit records; only super admins can change roles or delete.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use mt_dashboard_core::{
    Email, NewUser, Permission, Role, SessionRecord, Status, UserId, UserPatch, UserRecord,
};

use crate::error::AppError;
use crate::filters;
use crate::middleware::{RequireEditor, RequireSession, RequireSuperAdmin};
use crate::state::AppState;
use crate::store::{DirectoryRepository, StoreError};

use super::{FlashParams, SiteView, ViewerView, redirect_error, redirect_success, render_or_log};

const USERS_PATH: &str = "/dashboard/users";

// =============================================================================
// Views
// =============================================================================

/// Option in a role or status selector.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub value: &'static str,
    pub selected: bool,
}

fn role_options(current: Role) -> Vec<OptionView> {
    Role::ALL
        .iter()
        .map(|&role| OptionView {
            value: role.as_str(),
            selected: role == current,
        })
        .collect()
}

fn status_options(current: Status) -> Vec<OptionView> {
    [Status::Active, Status::Inactive]
        .iter()
        .map(|&status| OptionView {
            value: status.as_str(),
            selected: status == current,
        })
        .collect()
}

/// Directory row for templates.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub role_class: &'static str,
    pub status: String,
    pub is_active: bool,
    pub avatar: String,
    pub is_super_admin: bool,
    pub role_options: Vec<OptionView>,
}

impl From<&UserRecord> for UserRow {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.as_i32(),
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role.to_string(),
            role_class: match record.role {
                Role::SuperAdmin => "role-super-admin",
                Role::Admin => "role-admin",
                Role::User => "role-user",
            },
            status: record.status.to_string(),
            is_active: record.status.is_active(),
            avatar: record.avatar.clone(),
            is_super_admin: record.is_super_admin(),
            role_options: role_options(record.role),
        }
    }
}

/// Directory page template.
#[derive(Template)]
#[template(path = "users/index.html")]
pub struct UsersIndexTemplate {
    pub viewer: ViewerView,
    pub site: SiteView,
    pub current_path: String,
    pub users: Vec<UserRow>,
    pub new_user_roles: Vec<OptionView>,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

/// Edit record template.
#[derive(Template)]
#[template(path = "users/edit.html")]
pub struct UserEditTemplate {
    pub viewer: ViewerView,
    pub site: SiteView,
    pub current_path: String,
    pub user: UserRow,
    pub status_options: Vec<OptionView>,
    pub error_message: Option<String>,
}

// =============================================================================
// Forms
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateUserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditUserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleForm {
    #[serde(default)]
    pub role: String,
}

/// Build the directory router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(USERS_PATH, get(index).post(create))
        .route("/dashboard/users/{id}/edit", get(edit_page).post(update))
        .route("/dashboard/users/{id}/role", post(update_role))
        .route("/dashboard/users/{id}/delete", post(delete))
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Message shown after a refused or failed mutation.
fn store_error_message(err: &StoreError) -> Option<&'static str> {
    match err {
        StoreError::NotFound(_) => Some("User not found."),
        StoreError::ProtectedSuperAdmin(_) => {
            Some("The Super Admin cannot be deleted or given another role.")
        }
        _ => None,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /dashboard/users
#[instrument(skip(session, state))]
async fn index(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, AppError> {
    let records = DirectoryRepository::new(state.storage()).load().await?;

    let template = UsersIndexTemplate {
        viewer: ViewerView::from(&session),
        site: SiteView::load(&state).await,
        current_path: USERS_PATH.to_string(),
        users: records.iter().map(UserRow::from).collect(),
        new_user_roles: role_options(Role::User),
        success_message: flash.success,
        error_message: flash.error,
    };

    Ok(Html(render_or_log(&template)))
}

/// Build a [`NewUser`] from the form, returning the message to show on
/// invalid input.
///
/// Only viewers allowed to change roles may pick one; everyone else adds
/// plain users.
fn parse_new_user(form: CreateUserForm, viewer: &SessionRecord) -> Result<NewUser, String> {
    let name = non_empty(&form.name).ok_or("Name is required.")?;
    let email = Email::parse(&form.email).map_err(|e| format!("Invalid email: {e}."))?;

    let role = match form.role.as_deref().map(str::trim) {
        Some(role) if !role.is_empty() && viewer.role.allows(Permission::ChangeRole) => {
            role.parse::<Role>().map_err(|e| format!("{e}."))?
        }
        _ => Role::User,
    };
    let status = match form.status.as_deref().map(str::trim) {
        Some(status) if !status.is_empty() => status.parse::<Status>()?,
        _ => Status::Active,
    };

    Ok(NewUser {
        name,
        email,
        password: non_empty(&form.password),
        role,
        status,
        avatar: None,
    })
}

/// POST /dashboard/users
#[instrument(skip_all)]
async fn create(
    RequireEditor(session): RequireEditor,
    State(state): State<AppState>,
    Form(form): Form<CreateUserForm>,
) -> Result<Redirect, AppError> {
    let new_user = match parse_new_user(form, &session) {
        Ok(new_user) => new_user,
        Err(message) => return Ok(redirect_error(USERS_PATH, &message)),
    };

    let record = DirectoryRepository::new(state.storage())
        .create(new_user)
        .await?;

    Ok(redirect_success(
        USERS_PATH,
        &format!("{} was added.", record.name),
    ))
}

/// GET /dashboard/users/{id}/edit
#[instrument(skip(session, state))]
async fn edit_page(
    RequireEditor(session): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, AppError> {
    let record = DirectoryRepository::new(state.storage())
        .find(UserId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

    let template = UserEditTemplate {
        viewer: ViewerView::from(&session),
        site: SiteView::load(&state).await,
        current_path: USERS_PATH.to_string(),
        status_options: status_options(record.status),
        user: UserRow::from(&record),
        error_message: flash.error,
    };

    Ok(Html(render_or_log(&template)))
}

fn parse_patch(form: &EditUserForm) -> Result<UserPatch, String> {
    let name = non_empty(&form.name).ok_or("Name is required.")?;
    let email = Email::parse(&form.email).map_err(|e| format!("Invalid email: {e}."))?;
    let status = form.status.trim().parse::<Status>()?;

    Ok(UserPatch {
        name: Some(name),
        email: Some(email),
        password: non_empty(&form.password),
        status: Some(status),
        avatar: None,
    })
}

/// POST /dashboard/users/{id}/edit
#[instrument(skip(_session, state, form))]
async fn update(
    RequireEditor(_session): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<EditUserForm>,
) -> Result<Redirect, AppError> {
    let edit_path = format!("{USERS_PATH}/{id}/edit");
    let patch = match parse_patch(&form) {
        Ok(patch) => patch,
        Err(message) => return Ok(redirect_error(&edit_path, &message)),
    };

    match DirectoryRepository::new(state.storage())
        .update_fields(UserId::new(id), &patch)
        .await
    {
        Ok(record) => Ok(redirect_success(
            USERS_PATH,
            &format!("{} was updated.", record.name),
        )),
        Err(e) => match store_error_message(&e) {
            Some(message) => Ok(redirect_error(USERS_PATH, message)),
            None => Err(e.into()),
        },
    }
}

/// POST /dashboard/users/{id}/role
#[instrument(skip(_session, state, form))]
async fn update_role(
    RequireSuperAdmin(_session): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<RoleForm>,
) -> Result<Redirect, AppError> {
    let role = match form.role.parse::<Role>() {
        Ok(role) => role,
        Err(e) => return Ok(redirect_error(USERS_PATH, &format!("{e}."))),
    };

    match DirectoryRepository::new(state.storage())
        .update_role(UserId::new(id), role)
        .await
    {
        Ok(record) => Ok(redirect_success(
            USERS_PATH,
            &format!("{} is now {}.", record.name, record.role),
        )),
        Err(e) => match store_error_message(&e) {
            Some(message) => Ok(redirect_error(USERS_PATH, message)),
            None => Err(e.into()),
        },
    }
}

/// POST /dashboard/users/{id}/delete
#[instrument(skip(_session, state))]
async fn delete(
    RequireSuperAdmin(_session): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    match DirectoryRepository::new(state.storage())
        .delete(UserId::new(id))
        .await
    {
        Ok(record) => Ok(redirect_success(
            USERS_PATH,
            &format!("{} was deleted.", record.name),
        )),
        Err(e) => match store_error_message(&e) {
            Some(message) => Ok(redirect_error(USERS_PATH, message)),
            None => Err(e.into()),
        },
    }
}
