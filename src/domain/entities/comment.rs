//! Comment entity and repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A comment on a post.
///
/// Maps to the `comments` table; both `post_id` and `author_id` cascade on delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: i64, post_id: i64, author_id: i64, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            post_id,
            author_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

/// Repository trait for Comment data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError>;

    /// Comments on a post, oldest first.
    async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError>;

    /// Insert a comment. Fails with `NotFound` if the post no longer exists.
    async fn create(&self, comment: &Comment) -> Result<Comment, AppError>;

    async fn update(&self, comment: &Comment) -> Result<Comment, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
