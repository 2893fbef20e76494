//! Directory listing and role-gated mutations.

use axum::http::StatusCode;
use mt_dashboard::storage::Storage;
use mt_dashboard_core::{Role, Status, UserId, keys};
use mt_dashboard_integration_tests::{TestContext, form, user};

async fn seeded() -> TestContext {
    TestContext::with_users(&[
        user(1, "Dara", Some("pw-dara"), Role::SuperAdmin),
        user(2, "Sokha", Some("pw-sokha"), Role::Admin),
        user(3, "Vichea", Some("pw-vichea"), Role::User),
    ])
    .await
}

#[tokio::test]
async fn test_list_shows_records_and_super_admin_controls() {
    let ctx = seeded().await;
    let cookie = ctx.login_builtin().await;

    let page = ctx.get("/dashboard/users", Some(&cookie)).await;
    assert_eq!(page.status, StatusCode::OK);
    for email in [
        "dara@example.com",
        "sokha@example.com",
        "vichea@example.com",
    ] {
        assert!(page.body.contains(email), "{email} listed");
    }
    assert!(page.body.contains("/dashboard/users/3/delete"));
    assert!(page.body.contains("/dashboard/users/3/role"));
}

#[tokio::test]
async fn test_empty_directory_is_seeded_on_first_view() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login_builtin().await;
    assert_eq!(ctx.raw(keys::USERS).await, None);

    let page = ctx.get("/dashboard/users", Some(&cookie)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("No users yet."));
    assert_eq!(ctx.raw(keys::USERS).await.as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_plain_user_cannot_mutate() {
    let ctx = seeded().await;
    let cookie = ctx.login("vichea@example.com", "pw-vichea").await;

    let create = ctx
        .post_form(
            "/dashboard/users",
            form(&[("name", "Rithy"), ("email", "rithy@example.com")]),
            Some(&cookie),
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);

    let edit = ctx.get("/dashboard/users/2/edit", Some(&cookie)).await;
    assert_eq!(edit.status, StatusCode::FORBIDDEN);

    assert_eq!(ctx.users().await.len(), 3);
}

#[tokio::test]
async fn test_admin_can_create_but_not_delete_or_re_role() {
    let ctx = seeded().await;
    let cookie = ctx.login("sokha@example.com", "pw-sokha").await;

    let create = ctx
        .post_form(
            "/dashboard/users",
            form(&[
                ("name", "Rithy"),
                ("email", "rithy@example.com"),
                ("password", "pw-rithy"),
                ("role", "Super Admin"),
            ]),
            Some(&cookie),
        )
        .await;
    assert_eq!(create.status, StatusCode::SEE_OTHER);
    assert!(
        create
            .location()
            .is_some_and(|l| l.starts_with("/dashboard/users?success="))
    );

    let users = ctx.users().await;
    let rithy = users.last().expect("new record");
    assert_eq!(rithy.id, UserId::new(4));
    // Admins cannot choose a role.
    assert_eq!(rithy.role, Role::User);

    let delete = ctx
        .post_form("/dashboard/users/3/delete", String::new(), Some(&cookie))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let role = ctx
        .post_form(
            "/dashboard/users/3/role",
            form(&[("role", "Admin")]),
            Some(&cookie),
        )
        .await;
    assert_eq!(role.status, StatusCode::FORBIDDEN);

    assert_eq!(ctx.users().await.len(), 4);
}

#[tokio::test]
async fn test_created_user_can_sign_in() {
    let ctx = seeded().await;
    let cookie = ctx.login_builtin().await;

    ctx.post_form(
        "/dashboard/users",
        form(&[
            ("name", "Bopha"),
            ("email", "bopha@example.com"),
            ("password", "pw-bopha"),
            ("role", "Admin"),
        ]),
        Some(&cookie),
    )
    .await;

    let bopha = ctx.login("bopha@example.com", "pw-bopha").await;
    let edit = ctx.get("/dashboard/users/1/edit", Some(&bopha)).await;
    assert_eq!(edit.status, StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_create_redirects_with_error() {
    let ctx = seeded().await;
    let cookie = ctx.login_builtin().await;

    let response = ctx
        .post_form(
            "/dashboard/users",
            form(&[("name", "Rithy"), ("email", "not-an-email")]),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(
        response
            .location()
            .is_some_and(|l| l.starts_with("/dashboard/users?error="))
    );
    assert_eq!(ctx.users().await.len(), 3);
}

#[tokio::test]
async fn test_super_admin_role_change_is_persisted() {
    let ctx = seeded().await;
    let cookie = ctx.login_builtin().await;
    let before = ctx.users().await;

    let response = ctx
        .post_form(
            "/dashboard/users/3/role",
            form(&[("role", "Admin")]),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let after = ctx.users().await;
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(&after) {
        if new.id == UserId::new(3) {
            assert_eq!(new.role, Role::Admin);
            assert_eq!(new.name, old.name);
        } else {
            assert_eq!(new, old);
        }
    }
}

#[tokio::test]
async fn test_super_admin_record_is_protected() {
    let ctx = seeded().await;
    let cookie = ctx.login_builtin().await;
    let before = ctx.users().await;

    let delete = ctx
        .post_form("/dashboard/users/1/delete", String::new(), Some(&cookie))
        .await;
    assert_eq!(delete.status, StatusCode::SEE_OTHER);
    assert!(
        delete
            .location()
            .is_some_and(|l| l.starts_with("/dashboard/users?error="))
    );

    let demote = ctx
        .post_form(
            "/dashboard/users/1/role",
            form(&[("role", "User")]),
            Some(&cookie),
        )
        .await;
    assert!(
        demote
            .location()
            .is_some_and(|l| l.starts_with("/dashboard/users?error="))
    );

    assert_eq!(ctx.users().await, before);
}

#[tokio::test]
async fn test_super_admin_deletes_regular_record() {
    let ctx = seeded().await;
    let cookie = ctx.login_builtin().await;

    let response = ctx
        .post_form("/dashboard/users/2/delete", String::new(), Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let users = ctx.users().await;
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.id != UserId::new(2)));

    let page = ctx.get(response.location().expect("redirect"), Some(&cookie)).await;
    assert!(page.body.contains("Sokha was deleted."));
}

#[tokio::test]
async fn test_edit_record() {
    let ctx = seeded().await;
    let cookie = ctx.login("sokha@example.com", "pw-sokha").await;

    let page = ctx.get("/dashboard/users/3/edit", Some(&cookie)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("vichea@example.com"));

    let response = ctx
        .post_form(
            "/dashboard/users/3/edit",
            form(&[
                ("name", "Vichea Kim"),
                ("email", "vichea.kim@example.com"),
                ("password", ""),
                ("status", "Inactive"),
            ]),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let users = ctx.users().await;
    let vichea = users
        .iter()
        .find(|u| u.id == UserId::new(3))
        .expect("record kept");
    assert_eq!(vichea.name, "Vichea Kim");
    assert_eq!(vichea.email, "vichea.kim@example.com");
    assert_eq!(vichea.status, Status::Inactive);
    // Blank password leaves the old one in place.
    assert_eq!(vichea.password.as_deref(), Some("pw-vichea"));
}

#[tokio::test]
async fn test_edit_unknown_record_is_not_found() {
    let ctx = seeded().await;
    let cookie = ctx.login_builtin().await;

    let response = ctx.get("/dashboard/users/99/edit", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_corrupt_directory_is_a_server_error() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login_builtin().await;
    ctx.storage
        .set_item(keys::USERS, "{broken".to_string())
        .await
        .expect("write");

    let response = ctx.get("/dashboard/users", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, "Internal server error");
    // Left as-is for inspection.
    assert_eq!(ctx.raw(keys::USERS).await.as_deref(), Some("{broken"));
}

#[tokio::test]
async fn test_stored_roles_use_display_labels() {
    let ctx = seeded().await;
    let raw = ctx.raw(keys::USERS).await.expect("stored");
    assert!(raw.contains(r#""role":"Super Admin""#));
    assert!(raw.contains(r#""status":"Active""#));
}
