//! User Handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{AddGroupRequest, CreateUserRequest, UpdateUserRequest};
use crate::application::dto::response::UserResponse;
use crate::application::services::UserService;
use crate::presentation::http::extractors::{CurrentUser, IdPath, JsonBody, Pagination};
use crate::shared::error::AppError;
use crate::shared::snowflake;
use crate::startup::AppState;

/// List users
pub async fn list_users(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service().list_users(page).await?;
    Ok(Json(users))
}

/// Register a new account
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.user_service().create_user(body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get user by ID
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service().get_user(user_id).await?;
    Ok(Json(user))
}

/// Partially update an account
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    IdPath(user_id): IdPath,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .user_service()
        .update_user(&actor, user_id, body)
        .await?;
    Ok(Json(user))
}

/// Delete an account together with its posts and comments
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    IdPath(user_id): IdPath,
) -> Result<StatusCode, AppError> {
    state.user_service().delete_user(&actor, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a user to a group
pub async fn add_group(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    IdPath(user_id): IdPath,
    JsonBody(body): JsonBody<AddGroupRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service().add_group(&actor, user_id, body).await?;
    Ok(Json(user))
}

/// Remove a user from a group
pub async fn remove_group(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Path((user_id, group)) = path.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let user_id = snowflake::parse(&user_id)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid id: {}", user_id)))?;

    let user = state
        .user_service()
        .remove_group(&actor, user_id, &group)
        .await?;
    Ok(Json(user))
}
