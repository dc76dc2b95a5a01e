//! Post API Tests

use axum::http::StatusCode;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{unique_username, TestApp};

#[tokio::test]
async fn test_create_post_requires_auth() {
    let app = TestApp::new().await;

    app.server
        .post("/api/v1/posts")
        .json(&json!({ "title": "Hello", "content": "World" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_sets_author() {
    let app = TestApp::new().await;
    let user = app.user(&unique_username()).await;

    let response = app
        .server
        .post("/api/v1/posts")
        .authorization_bearer(&user.token)
        .json(&json!({ "title": "Hello", "content": "World" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["author"], user.id.as_str());
    assert_eq!(body["title"], "Hello");
}

#[tokio::test]
async fn test_post_roundtrips_generated_text() {
    let app = TestApp::new().await;
    let user = app.user(&unique_username()).await;
    let title: String = Sentence(3..8).fake();
    let content: String = Paragraph(2..5).fake();

    let post_id = app.create_post(&user.token, &title, &content).await;

    let response = app
        .server
        .get(&format!("/api/v1/posts/{}", post_id))
        .authorization_bearer(&user.token)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["title"], title.as_str());
    assert_eq!(body["content"], content.as_str());
}

#[tokio::test]
async fn test_create_post_validation() {
    let app = TestApp::new().await;
    let user = app.user(&unique_username()).await;

    for payload in [
        json!({ "title": "", "content": "World" }),
        json!({ "title": "Hello" }),
        json!({ "title": "x".repeat(201), "content": "World" }),
    ] {
        app.server
            .post("/api/v1/posts")
            .authorization_bearer(&user.token)
            .json(&payload)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_list_posts_is_public_and_newest_first() {
    let app = TestApp::new().await;
    let user = app.user(&unique_username()).await;
    let first = app.create_post(&user.token, "First", "1").await;
    let second = app.create_post(&user.token, "Second", "2").await;

    let response = app.server.get("/api/v1/posts").await;
    response.assert_status_ok();
    let posts: Vec<Value> = response.json();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["id"], second.as_str());
    assert_eq!(posts[1]["id"], first.as_str());
}

#[tokio::test]
async fn test_get_post_requires_auth() {
    let app = TestApp::new().await;
    let user = app.user(&unique_username()).await;
    let post_id = app.create_post(&user.token, "Hello", "World").await;

    app.server
        .get(&format!("/api/v1/posts/{}", post_id))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get(&format!("/api/v1/posts/{}", post_id))
        .authorization_bearer(&user.token)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["content"], "World");
}

#[tokio::test]
async fn test_non_author_cannot_modify_post() {
    let app = TestApp::new().await;
    let author = app.user(&unique_username()).await;
    let other = app.user(&unique_username()).await;
    let post_id = app.create_post(&author.token, "Mine", "All mine").await;

    app.server
        .patch(&format!("/api/v1/posts/{}", post_id))
        .authorization_bearer(&other.token)
        .json(&json!({ "title": "Yours now" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    app.server
        .delete(&format!("/api/v1/posts/{}", post_id))
        .authorization_bearer(&other.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_author_partially_updates_post() {
    let app = TestApp::new().await;
    let author = app.user(&unique_username()).await;
    let post_id = app.create_post(&author.token, "Draft", "Body").await;

    let response = app
        .server
        .patch(&format!("/api/v1/posts/{}", post_id))
        .authorization_bearer(&author.token)
        .json(&json!({ "title": "Final" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["title"], "Final");
    assert_eq!(body["content"], "Body");
}

#[tokio::test]
async fn test_update_checks_permission_before_payload() {
    let app = TestApp::new().await;
    let author = app.user(&unique_username()).await;
    let other = app.user(&unique_username()).await;
    let post_id = app.create_post(&author.token, "Draft", "Body").await;

    app.server
        .patch(&format!("/api/v1/posts/{}", post_id))
        .authorization_bearer(&other.token)
        .json(&json!({ "title": "" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    app.server
        .patch(&format!("/api/v1/posts/{}", post_id))
        .authorization_bearer(&author.token)
        .json(&json!({ "title": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_can_modify_any_post() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let author = app.user(&unique_username()).await;
    let post_id = app.create_post(&author.token, "Rule breaker", "Spam").await;

    app.server
        .patch(&format!("/api/v1/posts/{}", post_id))
        .authorization_bearer(&admin)
        .json(&json!({ "content": "[removed]" }))
        .await
        .assert_status_ok();

    app.server
        .delete(&format!("/api/v1/posts/{}", post_id))
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_post_twice() {
    let app = TestApp::new().await;
    let author = app.user(&unique_username()).await;
    let post_id = app.create_post(&author.token, "Short lived", "Bye").await;

    app.server
        .delete(&format!("/api/v1/posts/{}", post_id))
        .authorization_bearer(&author.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .delete(&format!("/api/v1/posts/{}", post_id))
        .authorization_bearer(&author.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
