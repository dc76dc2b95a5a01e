//! Post Service
//!
//! Handles post CRUD with author-or-admin write access.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use validator::{Validate, ValidationErrors};

use crate::application::dto::request::{CreatePostRequest, UpdatePostRequest};
use crate::application::dto::response::PostResponse;
use crate::domain::{Page, PermissionService, Post, PostRepository, User};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::validation_error;

/// Post service trait
#[async_trait]
pub trait PostService: Send + Sync {
    /// List posts, newest first
    async fn list_posts(&self, page: Page) -> Result<Vec<PostResponse>, PostError>;

    /// Get a single post
    async fn get_post(&self, post_id: i64) -> Result<PostResponse, PostError>;

    /// Create a post authored by `author`
    async fn create_post(&self, author: &User, request: CreatePostRequest) -> Result<PostResponse, PostError>;

    /// Update a post (author or admin)
    async fn update_post(
        &self,
        actor: &User,
        post_id: i64,
        request: UpdatePostRequest,
    ) -> Result<PostResponse, PostError>;

    /// Delete a post and its comments (author or admin)
    async fn delete_post(&self, actor: &User, post_id: i64) -> Result<(), PostError>;
}

/// Post service errors
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("Post not found")]
    NotFound,

    #[error("Not the author")]
    Forbidden,

    #[error("Invalid input")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Repository(#[from] AppError),
}

impl From<PostError> for AppError {
    fn from(err: PostError) -> Self {
        match err {
            PostError::NotFound => AppError::NotFound("Post not found.".into()),
            PostError::Forbidden => {
                AppError::Forbidden("You do not have permission to modify this post.".into())
            }
            PostError::Validation(errors) => validation_error(errors),
            PostError::Repository(e) => e,
        }
    }
}

/// PostService implementation
pub struct PostServiceImpl {
    posts: Arc<dyn PostRepository>,
    ids: Arc<SnowflakeGenerator>,
}

impl PostServiceImpl {
    pub fn new(posts: Arc<dyn PostRepository>, ids: Arc<SnowflakeGenerator>) -> Self {
        Self { posts, ids }
    }

    async fn load(&self, post_id: i64) -> Result<Post, PostError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or(PostError::NotFound)
    }

    /// Load a post the actor is allowed to change.
    async fn load_for_write(&self, actor: &User, post_id: i64) -> Result<Post, PostError> {
        let post = self.load(post_id).await?;
        if !PermissionService::can_modify_post(actor, &post) {
            tracing::debug!(post_id, actor_id = actor.id, "Post write denied");
            return Err(PostError::Forbidden);
        }
        Ok(post)
    }
}

#[async_trait]
impl PostService for PostServiceImpl {
    async fn list_posts(&self, page: Page) -> Result<Vec<PostResponse>, PostError> {
        let posts = self.posts.list(page.normalized()).await?;
        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    async fn get_post(&self, post_id: i64) -> Result<PostResponse, PostError> {
        self.load(post_id).await.map(PostResponse::from)
    }

    async fn create_post(&self, author: &User, request: CreatePostRequest) -> Result<PostResponse, PostError> {
        request.validate()?;

        let post = Post::new(self.ids.generate(), author.id, request.title, request.content);
        let post = self.posts.create(&post).await?;

        tracing::info!(post_id = post.id, author_id = author.id, "Post created");
        Ok(post.into())
    }

    async fn update_post(
        &self,
        actor: &User,
        post_id: i64,
        request: UpdatePostRequest,
    ) -> Result<PostResponse, PostError> {
        let mut post = self.load_for_write(actor, post_id).await?;
        request.validate()?;

        if let Some(title) = request.title {
            post.title = title;
        }
        if let Some(content) = request.content {
            post.content = content;
        }
        post.updated_at = Utc::now();

        let post = self.posts.update(&post).await?;
        tracing::info!(post_id = post.id, actor_id = actor.id, "Post updated");
        Ok(post.into())
    }

    async fn delete_post(&self, actor: &User, post_id: i64) -> Result<(), PostError> {
        let post = self.load_for_write(actor, post_id).await?;
        self.posts.delete(post.id).await?;

        tracing::info!(post_id = post.id, actor_id = actor.id, "Post deleted");
        Ok(())
    }
}
