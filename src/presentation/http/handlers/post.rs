//! Post Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::{CreatePostRequest, UpdatePostRequest};
use crate::application::dto::response::PostResponse;
use crate::application::services::PostService;
use crate::presentation::http::extractors::{CurrentUser, IdPath, JsonBody, Pagination};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List posts, newest first
pub async fn list_posts(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = state.post_service().list_posts(page).await?;
    Ok(Json(posts))
}

/// Create a post as the current user
pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(author): CurrentUser,
    JsonBody(body): JsonBody<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let post = state.post_service().create_post(&author, body).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Get post by ID
pub async fn get_post(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    IdPath(post_id): IdPath,
) -> Result<Json<PostResponse>, AppError> {
    let post = state.post_service().get_post(post_id).await?;
    Ok(Json(post))
}

/// Update a post
pub async fn update_post(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    IdPath(post_id): IdPath,
    JsonBody(body): JsonBody<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let post = state
        .post_service()
        .update_post(&actor, post_id, body)
        .await?;
    Ok(Json(post))
}

/// Delete a post and its comments
pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    IdPath(post_id): IdPath,
) -> Result<StatusCode, AppError> {
    state.post_service().delete_post(&actor, post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
