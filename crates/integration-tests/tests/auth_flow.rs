//! Login, logout, password reset and page guards.

use axum::http::StatusCode;
use mt_dashboard_core::{Role, keys};
use mt_dashboard_integration_tests::{TestContext, form, user};

#[tokio::test]
async fn test_landing_page_and_health() {
    let ctx = TestContext::new().await;

    let landing = ctx.get("/", None).await;
    assert_eq!(landing.status, StatusCode::OK);
    assert!(landing.body.contains("WELCOME"));
    assert!(landing.body.contains(r#"href="/login""#));

    let health = ctx.get("/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body, "ok");

    let ready = ctx.get("/health/ready", None).await;
    assert_eq!(ready.status, StatusCode::OK);
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let ctx = TestContext::new().await;
    let css = ctx.get("/static/dashboard.css", None).await;
    assert_eq!(css.status, StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_pages_redirect_anonymous_visitors() {
    let ctx = TestContext::new().await;

    for path in [
        "/dashboard",
        "/dashboard/profile",
        "/dashboard/users",
        "/dashboard/settings",
        "/dashboard/services",
    ] {
        let response = ctx.get(path, None).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{path}");
        assert_eq!(response.location(), Some("/login"), "{path}");
    }
}

#[tokio::test]
async fn test_builtin_login_reaches_dashboard() {
    let ctx = TestContext::new().await;

    let response = ctx
        .post_form(
            "/login",
            form(&[("email", "admin@mt.com"), ("password", "1234")]),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/dashboard"));

    let cookie = response.session_cookie().expect("session cookie");
    let dashboard = ctx.get("/dashboard", Some(&cookie)).await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert!(dashboard.body.contains("Welcome back, MT!"));
    assert!(dashboard.body.contains("admin@mt.com"));
    assert!(dashboard.body.contains("Super Admin"));

    // The session lives in the visitor's cookie session, not the shared store.
    assert_eq!(ctx.raw(keys::CURRENT_USER).await, None);
}

#[tokio::test]
async fn test_failed_login_shows_error_and_sets_no_session() {
    let ctx = TestContext::new().await;

    let response = ctx
        .post_form(
            "/login",
            form(&[("email", "admin@mt.com"), ("password", "wrong")]),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(
        response
            .body
            .contains("Invalid username or password. Please try again.")
    );

    if let Some(cookie) = response.session_cookie() {
        let dashboard = ctx.get("/dashboard", Some(&cookie)).await;
        assert_eq!(dashboard.location(), Some("/login"));
    }
}

#[tokio::test]
async fn test_directory_record_login_uses_record_role() {
    let ctx = TestContext::with_users(&[
        user(1, "Sokha", Some("pw"), Role::Admin),
        user(2, "Nopass", None, Role::Admin),
    ])
    .await;

    let cookie = ctx.login("sokha@example.com", "pw").await;
    let dashboard = ctx.get("/dashboard", Some(&cookie)).await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert!(dashboard.body.contains("sokha@example.com"));

    // A record without a password cannot sign in with an empty one.
    let response = ctx
        .post_form(
            "/login",
            form(&[("email", "nopass@example.com"), ("password", "")]),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_session_and_goes_home() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login_builtin().await;

    let response = ctx.post_form("/logout", String::new(), Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));

    let dashboard = ctx.get("/dashboard", Some(&cookie)).await;
    assert_eq!(dashboard.status, StatusCode::SEE_OTHER);
    assert_eq!(dashboard.location(), Some("/login"));
}

#[tokio::test]
async fn test_logout_without_session_still_redirects_home() {
    let ctx = TestContext::new().await;
    let response = ctx.post_form("/logout", String::new(), None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn test_sessions_are_per_visitor() {
    let ctx = TestContext::with_users(&[user(1, "Dara", Some("pw"), Role::User)]).await;

    let admin = ctx.login_builtin().await;
    let member = ctx.login("dara@example.com", "pw").await;
    assert_ne!(admin, member);

    let users_as_admin = ctx.get("/dashboard/users", Some(&admin)).await;
    assert!(users_as_admin.body.contains("Add User"));

    let users_as_member = ctx.get("/dashboard/users", Some(&member)).await;
    assert_eq!(users_as_member.status, StatusCode::OK);
    assert!(!users_as_member.body.contains("Add User"));
}

#[tokio::test]
async fn test_forgot_password_validation() {
    let ctx = TestContext::new().await;

    let page = ctx.get("/forgot-password", None).await;
    assert_eq!(page.status, StatusCode::OK);

    let empty = ctx
        .post_form("/forgot-password", form(&[("email", "")]), None)
        .await;
    assert_eq!(empty.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(empty.body.contains("Email address is required."));

    let padded = ctx
        .post_form("/forgot-password", form(&[("email", " sokha@mt.com")]), None)
        .await;
    assert_eq!(padded.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(padded.body.contains("Please enter a valid email address."));

    let invalid = ctx
        .post_form("/forgot-password", form(&[("email", "sokha@mt")]), None)
        .await;
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(invalid.body.contains("Please enter a valid email address."));

    let accepted = ctx
        .post_form("/forgot-password", form(&[("email", "sokha@mt.com")]), None)
        .await;
    assert_eq!(accepted.status, StatusCode::OK);
    assert!(
        accepted
            .body
            .contains("If an account with that email exists, a reset link has been sent.")
    );
}
