//! Authentication API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{unique_username, TestApp, TEST_PASSWORD};

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let app = TestApp::new().await;
    let username = unique_username();
    app.register(&username, TEST_PASSWORD).await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": username, "password": TEST_PASSWORD }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Login successful!");
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_login_is_greeted() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({
            "username": crate::common::ADMIN_USERNAME,
            "password": crate::common::ADMIN_PASSWORD,
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Login successful! Welcome, Admin!");
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let app = TestApp::new().await;
    let username = unique_username();
    app.register(&username, TEST_PASSWORD).await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": username, "password": "WrongPassword!" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid credentials.");
}

#[tokio::test]
async fn test_login_with_unknown_user_fails() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": "nobody", "password": TEST_PASSWORD }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_blank_fields_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": "", "password": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/v1/auth/login")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_requires_token() {
    let app = TestApp::new().await;

    app.server
        .get("/api/v1/protected")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .get("/api/v1/protected")
        .authorization_bearer("not-a-jwt")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_with_token() {
    let app = TestApp::new().await;
    let user = app.user(&unique_username()).await;

    let response = app
        .server
        .get("/api/v1/protected")
        .authorization_bearer(&user.token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Authenticated!");
}

#[tokio::test]
async fn test_token_of_deleted_user_is_rejected() {
    let app = TestApp::new().await;
    let user = app.user(&unique_username()).await;

    app.server
        .delete(&format!("/api/v1/users/{}", user.id))
        .authorization_bearer(&user.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get("/api/v1/protected")
        .authorization_bearer(&user.token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
