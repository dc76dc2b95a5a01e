//! Comment Service
//!
//! Comments on posts. Reads are open to any authenticated user, writes
//! need the comment's author or an admin.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use validator::{Validate, ValidationErrors};

use crate::application::dto::request::{CreateCommentRequest, UpdateCommentRequest};
use crate::application::dto::response::CommentResponse;
use crate::domain::{Comment, CommentRepository, PermissionService, PostRepository, User};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::validation_error;

/// Comment service trait
#[async_trait]
pub trait CommentService: Send + Sync {
    /// Comments on a post, oldest first. An empty list is reported as not found.
    async fn list_comments(&self, post_id: i64) -> Result<Vec<CommentResponse>, CommentError>;

    /// Comment on an existing post
    async fn create_comment(
        &self,
        author: &User,
        post_id: i64,
        request: CreateCommentRequest,
    ) -> Result<CommentResponse, CommentError>;

    async fn get_comment(&self, comment_id: i64) -> Result<CommentResponse, CommentError>;

    /// Update a comment (author or admin)
    async fn update_comment(
        &self,
        actor: &User,
        comment_id: i64,
        request: UpdateCommentRequest,
    ) -> Result<CommentResponse, CommentError>;

    /// Delete a comment (author or admin)
    async fn delete_comment(&self, actor: &User, comment_id: i64) -> Result<(), CommentError>;
}

/// Comment service errors
#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    #[error("Comment not found")]
    NotFound,

    #[error("Post not found")]
    PostNotFound,

    #[error("No comments on post")]
    NoComments,

    #[error("Not the author")]
    Forbidden,

    #[error("Invalid input")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<CommentError> for AppError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::NotFound => AppError::NotFound("Comment not found.".into()),
            CommentError::PostNotFound => AppError::NotFound("Post not found.".into()),
            CommentError::NoComments => {
                AppError::NotFound("No comments found for this post.".into())
            }
            CommentError::Forbidden => {
                AppError::Forbidden("You do not have permission to modify this comment.".into())
            }
            CommentError::Validation(errors) => validation_error(errors),
            CommentError::Repository(e) => e,
        }
    }
}

/// CommentService implementation
pub struct CommentServiceImpl {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
    ids: Arc<SnowflakeGenerator>,
}

impl CommentServiceImpl {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        posts: Arc<dyn PostRepository>,
        ids: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self { comments, posts, ids }
    }

    async fn load(&self, comment_id: i64) -> Result<Comment, CommentError> {
        self.comments
            .find_by_id(comment_id)
            .await?
            .ok_or(CommentError::NotFound)
    }

    async fn load_for_write(&self, actor: &User, comment_id: i64) -> Result<Comment, CommentError> {
        let comment = self.load(comment_id).await?;
        if !PermissionService::can_modify_comment(actor, &comment) {
            tracing::debug!(comment_id, actor_id = actor.id, "Comment write denied");
            return Err(CommentError::Forbidden);
        }
        Ok(comment)
    }
}

#[async_trait]
impl CommentService for CommentServiceImpl {
    async fn list_comments(&self, post_id: i64) -> Result<Vec<CommentResponse>, CommentError> {
        let comments = self.comments.list_by_post(post_id).await?;
        if comments.is_empty() {
            return Err(CommentError::NoComments);
        }
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    async fn create_comment(
        &self,
        author: &User,
        post_id: i64,
        request: CreateCommentRequest,
    ) -> Result<CommentResponse, CommentError> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(CommentError::PostNotFound);
        }
        request.validate()?;

        let comment = Comment::new(self.ids.generate(), post_id, author.id, request.content);
        let comment = self.comments.create(&comment).await?;

        tracing::info!(comment_id = comment.id, post_id, author_id = author.id, "Comment created");
        Ok(comment.into())
    }

    async fn get_comment(&self, comment_id: i64) -> Result<CommentResponse, CommentError> {
        self.load(comment_id).await.map(CommentResponse::from)
    }

    async fn update_comment(
        &self,
        actor: &User,
        comment_id: i64,
        request: UpdateCommentRequest,
    ) -> Result<CommentResponse, CommentError> {
        let mut comment = self.load_for_write(actor, comment_id).await?;
        request.validate()?;

        if let Some(content) = request.content {
            comment.content = content;
        }
        comment.updated_at = Utc::now();

        let comment = self.comments.update(&comment).await?;
        tracing::info!(comment_id = comment.id, actor_id = actor.id, "Comment updated");
        Ok(comment.into())
    }

    async fn delete_comment(&self, actor: &User, comment_id: i64) -> Result<(), CommentError> {
        let comment = self.load_for_write(actor, comment_id).await?;
        self.comments.delete(comment.id).await?;

        tracing::info!(comment_id = comment.id, actor_id = actor.id, "Comment deleted");
        Ok(())
    }
}
