//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure. Every `TestApp`
//! runs the full router against its own in-memory store.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use blog_api::config::{
    AdminSettings, CorsSettings, DatabaseSettings, JwtSettings, ServerSettings, Settings,
    SnowflakeSettings, StorageBackend,
};
use blog_api::shared::snowflake::DEFAULT_EPOCH;
use blog_api::startup::{bootstrap_admin, build_router, AppState};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "AdminPassword123!";
pub const TEST_PASSWORD: &str = "TestPassword123!";

/// Test application builder
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

/// A registered user and its bearer token
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub token: String,
}

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseSettings {
            backend: StorageBackend::Memory,
            url: String::new(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 1,
            run_migrations: false,
        },
        jwt: JwtSettings {
            secret: "integration-test-secret-0123456789abcdef".into(),
            token_expiry_minutes: 60,
        },
        snowflake: SnowflakeSettings {
            machine_id: 1,
            epoch: DEFAULT_EPOCH,
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        admin: AdminSettings {
            username: Some(ADMIN_USERNAME.into()),
            password: Some(ADMIN_PASSWORD.into()),
            email: Some("admin@example.com".into()),
        },
        environment: "test".into(),
    }
}

impl TestApp {
    /// Fresh application with the bootstrap admin account in place
    pub async fn new() -> Self {
        let state = AppState::in_memory(test_settings());
        bootstrap_admin(&state)
            .await
            .expect("Failed to bootstrap admin");

        let server = TestServer::new(build_router(state.clone())).expect("Failed to start test server");
        Self { server, state }
    }

    /// Register an account and return the response body
    pub async fn register(&self, username: &str, password: &str) -> Value {
        let response = self
            .server
            .post("/api/v1/users")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": password,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    /// Log in and return the bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .server
            .post("/api/v1/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        body["token"]
            .as_str()
            .expect("login response carries a token")
            .to_string()
    }

    /// Register and log in a regular user
    pub async fn user(&self, username: &str) -> TestUser {
        let created = self.register(username, TEST_PASSWORD).await;
        let token = self.login(username, TEST_PASSWORD).await;
        TestUser {
            id: created["id"].as_str().expect("user id").to_string(),
            username: username.to_string(),
            token,
        }
    }

    /// Token for the bootstrap admin
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Create a post as `token` and return its id
    pub async fn create_post(&self, token: &str, title: &str, content: &str) -> String {
        let response = self
            .server
            .post("/api/v1/posts")
            .authorization_bearer(token)
            .json(&json!({ "title": title, "content": content }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        body["id"].as_str().expect("post id").to_string()
    }

    /// Comment on a post as `token` and return the comment id
    pub async fn create_comment(&self, token: &str, post_id: &str, content: &str) -> String {
        let response = self
            .server
            .post(&format!("/api/v1/posts/{}/comments", post_id))
            .authorization_bearer(token)
            .json(&json!({ "content": content }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        body["id"].as_str().expect("comment id").to_string()
    }
}

/// Generate a unique test username
pub fn unique_username() -> String {
    format!("user_{}", &uuid::Uuid::new_v4().simple().to_string()[..8])
}
