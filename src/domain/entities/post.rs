//! Post entity and repository trait.
//!
//! Maps to the `posts` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Page;
use crate::shared::error::AppError;

/// A blog post.
///
/// Maps to the `posts` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - author_id: BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE
/// - title: VARCHAR(200) NOT NULL
/// - content: TEXT NOT NULL
/// - created_at / updated_at: TIMESTAMPTZ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(id: i64, author_id: i64, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

/// Repository trait for Post data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// List posts, newest first.
    async fn list(&self, page: Page) -> Result<Vec<Post>, AppError>;

    async fn create(&self, post: &Post) -> Result<Post, AppError>;

    /// Persist title and content.
    async fn update(&self, post: &Post) -> Result<Post, AppError>;

    /// Delete a post and its comments.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
