//! Comment Handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::{CreateCommentRequest, UpdateCommentRequest};
use crate::application::dto::response::CommentResponse;
use crate::application::services::CommentService;
use crate::presentation::http::extractors::{CurrentUser, IdPath, JsonBody};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Comments on a post, oldest first
pub async fn list_comments(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    IdPath(post_id): IdPath,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let comments = state.comment_service().list_comments(post_id).await?;
    Ok(Json(comments))
}

/// Comment on a post
pub async fn create_comment(
    State(state): State<AppState>,
    CurrentUser(author): CurrentUser,
    IdPath(post_id): IdPath,
    JsonBody(body): JsonBody<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    let comment = state
        .comment_service()
        .create_comment(&author, post_id, body)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn get_comment(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    IdPath(comment_id): IdPath,
) -> Result<Json<CommentResponse>, AppError> {
    let comment = state.comment_service().get_comment(comment_id).await?;
    Ok(Json(comment))
}

pub async fn update_comment(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    IdPath(comment_id): IdPath,
    JsonBody(body): JsonBody<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let comment = state
        .comment_service()
        .update_comment(&actor, comment_id, body)
        .await?;
    Ok(Json(comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    IdPath(comment_id): IdPath,
) -> Result<StatusCode, AppError> {
    state
        .comment_service()
        .delete_comment(&actor, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
