//! Admin probe and group management tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{unique_username, TestApp, TEST_PASSWORD};

#[tokio::test]
async fn test_admin_probe_rejects_anonymous() {
    let app = TestApp::new().await;

    app.server
        .get("/api/v1/admin")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_probe_forbids_regular_user() {
    let app = TestApp::new().await;
    let user = app.user(&unique_username()).await;

    app.server
        .get("/api/v1/admin")
        .authorization_bearer(&user.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_probe_welcomes_admin() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .server
        .get("/api/v1/admin")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Welcome, Admin!");
}

#[tokio::test]
async fn test_granting_admin_group_takes_effect_immediately() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let user = app.user(&unique_username()).await;

    let response = app
        .server
        .post(&format!("/api/v1/users/{}/groups", user.id))
        .authorization_bearer(&admin)
        .json(&json!({ "name": "Admin" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["is_admin"], true);

    // Same token, fresh group membership.
    app.server
        .get("/api/v1/admin")
        .authorization_bearer(&user.token)
        .await
        .assert_status_ok();

    app.server
        .delete(&format!("/api/v1/users/{}/groups/Admin", user.id))
        .authorization_bearer(&admin)
        .await
        .assert_status_ok();

    app.server
        .get("/api/v1/admin")
        .authorization_bearer(&user.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_group_management_requires_admin() {
    let app = TestApp::new().await;
    let user = app.user(&unique_username()).await;

    app.server
        .post(&format!("/api/v1/users/{}/groups", user.id))
        .authorization_bearer(&user.token)
        .json(&json!({ "name": "Admin" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_login_message_after_promotion() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let user = app.user(&unique_username()).await;

    app.server
        .post(&format!("/api/v1/users/{}/groups", user.id))
        .authorization_bearer(&admin)
        .json(&json!({ "name": "Admin" }))
        .await
        .assert_status_ok();

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": user.username, "password": TEST_PASSWORD }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["message"], "Login successful! Welcome, Admin!");
}

#[tokio::test]
async fn test_remove_group_with_undecodable_name_uses_error_envelope() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let user = app.user(&unique_username()).await;

    let response = app
        .server
        .delete(&format!("/api/v1/users/{}/groups/%FF", user.id))
        .authorization_bearer(&admin)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], 10002);
    assert!(body["message"].is_string());
}
