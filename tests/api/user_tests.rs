//! User API Tests

use axum::http::StatusCode;
use serde_json::{json, Value};

use blog_api::domain::UserRepository;

use crate::common::{unique_username, TestApp, TEST_PASSWORD};

#[tokio::test]
async fn test_register_hides_password() {
    let app = TestApp::new().await;
    let username = unique_username();

    let body = app.register(&username, TEST_PASSWORD).await;
    assert_eq!(body["username"], username.as_str());
    assert_eq!(body["is_admin"], false);
    assert!(body.get("password").is_none());
    assert!(!body.to_string().contains(TEST_PASSWORD));
}

#[tokio::test]
async fn test_stored_password_is_hashed() {
    let app = TestApp::new().await;
    let username = unique_username();
    app.register(&username, TEST_PASSWORD).await;

    let stored = app
        .state
        .users
        .find_by_username(&username)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, TEST_PASSWORD);
    assert!(stored.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let app = TestApp::new().await;
    let username = unique_username();
    app.register(&username, TEST_PASSWORD).await;

    let response = app
        .server
        .post("/api/v1/users")
        .json(&json!({ "username": username, "password": TEST_PASSWORD }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["field"], "username");
    assert_eq!(
        body["errors"][0]["message"],
        "A user with that username already exists."
    );
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;

    for payload in [
        json!({ "username": "ok_name", "password": "short" }),
        json!({ "username": "bad name", "password": TEST_PASSWORD }),
        json!({ "username": "ok_name", "email": "not-an-email", "password": TEST_PASSWORD }),
        json!({ "password": TEST_PASSWORD }),
    ] {
        app.server
            .post("/api/v1/users")
            .json(&payload)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_list_and_get_users_are_public() {
    let app = TestApp::new().await;
    let created = app.register(&unique_username(), TEST_PASSWORD).await;
    let id = created["id"].as_str().unwrap();

    let response = app.server.get("/api/v1/users").await;
    response.assert_status_ok();
    let users: Vec<Value> = response.json();
    // Bootstrap admin plus the new account.
    assert_eq!(users.len(), 2);

    let response = app.server.get(&format!("/api/v1/users/{}", id)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], id);
}

#[tokio::test]
async fn test_list_users_pagination() {
    let app = TestApp::new().await;
    for _ in 0..3 {
        app.register(&unique_username(), TEST_PASSWORD).await;
    }

    let response = app.server.get("/api/v1/users?limit=2&offset=1").await;
    response.assert_status_ok();
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn test_get_unknown_user() {
    let app = TestApp::new().await;

    app.server
        .get("/api/v1/users/123456789")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get("/api/v1/users/not-a-number")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_updates_own_profile() {
    let app = TestApp::new().await;
    let user = app.user(&unique_username()).await;

    let response = app
        .server
        .patch(&format!("/api/v1/users/{}", user.id))
        .authorization_bearer(&user.token)
        .json(&json!({ "email": "new@example.com", "password": "AnotherPassword1" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["email"], "new@example.com");
    assert_eq!(body["username"], user.username.as_str());

    // New password works, old one does not.
    app.login(&user.username, "AnotherPassword1").await;
    app.server
        .post("/api/v1/auth/login")
        .json(&json!({ "username": user.username, "password": TEST_PASSWORD }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_cannot_update_someone_else() {
    let app = TestApp::new().await;
    let alice = app.user(&unique_username()).await;
    let bob = app.user(&unique_username()).await;

    app.server
        .patch(&format!("/api/v1/users/{}", bob.id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "email": "hijack@example.com" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    app.server
        .patch(&format!("/api/v1/users/{}", bob.id))
        .json(&json!({ "email": "hijack@example.com" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_deletes_user_and_their_content() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let author = app.user(&unique_username()).await;
    let post_id = app.create_post(&author.token, "Doomed", "Soon gone").await;

    app.server
        .delete(&format!("/api/v1/users/{}", author.id))
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get(&format!("/api/v1/users/{}", author.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("/api/v1/posts/{}", post_id))
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .delete(&format!("/api/v1/users/{}", author.id))
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
