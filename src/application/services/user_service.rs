//! User Service
//!
//! Registration, profile management and group membership.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use validator::{Validate, ValidationErrors};

use crate::application::dto::request::{
    AddGroupRequest, CreateUserRequest, UpdateUserRequest,
};
use crate::application::dto::response::UserResponse;
use crate::application::services::auth_service::hash_password;
use crate::domain::{Page, PermissionService, User, UserRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::validation_error;

pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// List users ordered by id
    async fn list_users(&self, page: Page) -> Result<Vec<UserResponse>, UserError>;

    /// Get user by ID
    async fn get_user(&self, user_id: i64) -> Result<UserResponse, UserError>;

    /// Register a new account
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse, UserError>;

    /// Partially update an account (self or admin)
    async fn update_user(
        &self,
        actor: &User,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, UserError>;

    /// Delete an account (self or admin)
    async fn delete_user(&self, actor: &User, user_id: i64) -> Result<(), UserError>;

    /// Add a user to a group (admin only)
    async fn add_group(
        &self,
        actor: &User,
        user_id: i64,
        request: AddGroupRequest,
    ) -> Result<UserResponse, UserError>;

    /// Remove a user from a group (admin only)
    async fn remove_group(
        &self,
        actor: &User,
        user_id: i64,
        group: &str,
    ) -> Result<UserResponse, UserError>;
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Permission denied")]
    Forbidden,

    #[error("Invalid input")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Repository(#[from] AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => AppError::NotFound("User not found.".into()),
            UserError::UsernameTaken => AppError::field("username", USERNAME_TAKEN),
            UserError::Forbidden => AppError::Forbidden(
                "You do not have permission to perform this action.".into(),
            ),
            UserError::Validation(errors) => validation_error(errors),
            UserError::Repository(e) => e,
            UserError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// UserService implementation
pub struct UserServiceImpl {
    users: Arc<dyn UserRepository>,
    ids: Arc<SnowflakeGenerator>,
}

impl UserServiceImpl {
    pub fn new(users: Arc<dyn UserRepository>, ids: Arc<SnowflakeGenerator>) -> Self {
        Self { users, ids }
    }

    async fn load(&self, user_id: i64) -> Result<User, UserError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)
    }

    fn hash(password: &str) -> Result<String, UserError> {
        hash_password(password).map_err(|e| UserError::Internal(e.to_string()))
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn list_users(&self, page: Page) -> Result<Vec<UserResponse>, UserError> {
        let users = self.users.list(page.normalized()).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn get_user(&self, user_id: i64) -> Result<UserResponse, UserError> {
        self.load(user_id).await.map(UserResponse::from)
    }

    async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse, UserError> {
        request.validate()?;

        if self.users.username_exists(&request.username).await? {
            return Err(UserError::UsernameTaken);
        }

        let user = User::new(
            self.ids.generate(),
            request.username,
            request.email.unwrap_or_default(),
            Self::hash(&request.password)?,
        );
        let user = self.users.create(&user).await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user.into())
    }

    async fn update_user(
        &self,
        actor: &User,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, UserError> {
        let mut user = self.load(user_id).await?;

        if !PermissionService::can_manage_user(actor, user.id) {
            return Err(UserError::Forbidden);
        }

        request.validate()?;

        if let Some(username) = request.username {
            if username != user.username && self.users.username_exists(&username).await? {
                return Err(UserError::UsernameTaken);
            }
            user.username = username;
        }
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(password) = request.password {
            user.password_hash = Self::hash(&password)?;
        }
        user.updated_at = Utc::now();

        let user = self.users.update(&user).await?;
        tracing::info!(user_id = user.id, actor_id = actor.id, "User updated");
        Ok(user.into())
    }

    async fn delete_user(&self, actor: &User, user_id: i64) -> Result<(), UserError> {
        let user = self.load(user_id).await?;

        if !PermissionService::can_manage_user(actor, user.id) {
            return Err(UserError::Forbidden);
        }

        self.users.delete(user.id).await?;
        tracing::info!(user_id = user.id, actor_id = actor.id, "User deleted");
        Ok(())
    }

    async fn add_group(
        &self,
        actor: &User,
        user_id: i64,
        request: AddGroupRequest,
    ) -> Result<UserResponse, UserError> {
        if !PermissionService::is_admin(actor) {
            return Err(UserError::Forbidden);
        }
        let user = self.load(user_id).await?;
        request.validate()?;

        let group = request.name.trim();
        self.users.add_to_group(user.id, group).await?;
        tracing::info!(user_id = user.id, group, actor_id = actor.id, "Group membership added");

        self.get_user(user.id).await
    }

    async fn remove_group(
        &self,
        actor: &User,
        user_id: i64,
        group: &str,
    ) -> Result<UserResponse, UserError> {
        if !PermissionService::is_admin(actor) {
            return Err(UserError::Forbidden);
        }
        let user = self.load(user_id).await?;

        self.users.remove_from_group(user.id, group).await?;
        tracing::info!(user_id = user.id, group, actor_id = actor.id, "Group membership removed");

        self.get_user(user.id).await
    }
}
