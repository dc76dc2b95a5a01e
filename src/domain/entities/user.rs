//! User entity and repository trait.
//!
//! Maps to the `users` and `user_groups` tables in the database schema.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Page;
use crate::shared::error::AppError;

/// Members of this group pass every admin check.
pub const ADMIN_GROUP: &str = "Admin";

/// Represents a user account.
///
/// Maps to the `users` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - username: VARCHAR(150) NOT NULL UNIQUE
/// - email: VARCHAR(254) NOT NULL DEFAULT ''
/// - password_hash: VARCHAR(255) NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// Group names come from `user_groups (user_id, group_name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Username (unique)
    pub username: String,

    /// Email address, may be blank
    pub email: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Group memberships
    #[serde(default)]
    pub groups: BTreeSet<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new, not yet persisted user.
    pub fn new(id: i64, username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            password_hash,
            groups: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check group membership.
    pub fn in_group(&self, name: &str) -> bool {
        self.groups.contains(name)
    }

    /// Whether the user belongs to the `Admin` group.
    pub fn is_admin(&self) -> bool {
        self.in_group(ADMIN_GROUP)
    }
}

/// Repository trait for User data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// List users ordered by id.
    async fn list(&self, page: Page) -> Result<Vec<User>, AppError>;

    /// Create a new user. Fails with a `username` validation error on duplicates.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Update username, email and password hash.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Delete a user by ID, cascading to their posts and comments.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Check if a username is already taken.
    async fn username_exists(&self, username: &str) -> Result<bool, AppError>;

    /// Add the user to a group (no-op if already a member).
    async fn add_to_group(&self, user_id: i64, group: &str) -> Result<(), AppError>;

    /// Remove the user from a group (no-op if not a member).
    async fn remove_from_group(&self, user_id: i64, group: &str) -> Result<(), AppError>;
}
