//! Health and metrics endpoint tests

use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_liveness() {
    let app = TestApp::new().await;

    let response = app.server.get("/health/live").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_with_memory_backend() {
    let app = TestApp::new().await;

    let response = app.server.get("/health/ready").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["backend"], "memory");
}

#[tokio::test]
async fn test_metrics_exposes_route_templates() {
    let app = TestApp::new().await;
    app.server.get("/api/v1/posts").await.assert_status_ok();

    let response = app.server.get("/metrics").await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("blog_api_http_requests_total"));
    assert!(text.contains("/api/v1/posts"));
}
