//! Integration tests for the MT Dashboard.
//!
//! Tests drive the full router in-process against an in-memory `SQLite`
//! database, so no server or external database is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mt-dashboard-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - login, logout, forgot password, page guards
//! - `users` - directory listing and role-gated mutations
//! - `settings` - site settings persistence

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use mt_dashboard::config::DashboardConfig;
use mt_dashboard::storage::{SqliteStorage, Storage};
use mt_dashboard::store::DirectoryRepository;
use mt_dashboard::{app, db};
use mt_dashboard_core::{Role, Status, UserId, UserRecord, keys};

/// A fully wired dashboard over a fresh in-memory database.
pub struct TestContext {
    pub app: Router,
    pub storage: SqliteStorage,
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The `name=value` pair of the session cookie, if one was set.
    #[must_use]
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(mt_dashboard::middleware::SESSION_COOKIE_NAME))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

/// Build a test directory record.
#[must_use]
pub fn user(id: i32, name: &str, password: Option<&str>, role: Role) -> UserRecord {
    UserRecord {
        id: UserId::new(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        password: password.map(str::to_string),
        role,
        status: Status::Active,
        avatar: keys::DEFAULT_AVATAR.to_string(),
    }
}

/// Encode form fields as `application/x-www-form-urlencoded`.
#[must_use]
pub fn form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

impl TestContext {
    /// Create a dashboard over an empty in-memory database.
    pub async fn new() -> Self {
        let config = DashboardConfig::in_memory();
        let pool = db::create_pool(&config.database_url)
            .await
            .expect("Failed to create in-memory pool");
        let storage = SqliteStorage::new(pool.clone());
        let app = app::build(config, pool)
            .await
            .expect("Failed to build application");

        Self { app, storage }
    }

    /// Create a dashboard whose directory holds `records`.
    pub async fn with_users(records: &[UserRecord]) -> Self {
        let ctx = Self::new().await;
        DirectoryRepository::new(&ctx.storage)
            .save(records)
            .await
            .expect("Failed to seed directory");
        ctx
    }

    /// Current directory contents.
    pub async fn users(&self) -> Vec<UserRecord> {
        DirectoryRepository::new(&self.storage)
            .load()
            .await
            .expect("Failed to load directory")
    }

    /// Raw stored value under `key`.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.storage
            .get_item(key)
            .await
            .expect("Failed to read storage")
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// GET `uri`, optionally with a session cookie.
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).expect("Invalid request"))
            .await
    }

    /// POST a form body to `uri`, optionally with a session cookie.
    pub async fn post_form(&self, uri: &str, body: String, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).expect("Invalid request"))
            .await
    }

    /// Log in and return the session cookie.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/login",
                form(&[("email", email), ("password", password)]),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "login should succeed");
        response
            .session_cookie()
            .expect("login should set a session cookie")
    }

    /// Log in as the built-in super admin.
    pub async fn login_builtin(&self) -> String {
        self.login(
            keys::BUILTIN_SUPER_ADMIN_EMAIL,
            keys::BUILTIN_SUPER_ADMIN_PASSWORD,
        )
        .await
    }
}
