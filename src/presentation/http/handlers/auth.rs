//! Authentication Handlers

use axum::{extract::State, Json};

use crate::application::dto::request::LoginRequest;
use crate::application::dto::response::{LoginResponse, MessageResponse};
use crate::application::services::AuthService;
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::{AdminUser, CurrentUser, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Exchange username and password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let result = state
        .auth_service()
        .login(&body.username, &body.password)
        .await;
    metrics::record_login(result.is_ok());

    let (user, token) = result?;
    let message = if user.is_admin() {
        "Login successful! Welcome, Admin!"
    } else {
        "Login successful!"
    };

    Ok(Json(LoginResponse {
        message: message.to_string(),
        token: token.token,
        token_type: token.token_type,
        expires_in: token.expires_in,
    }))
}

/// Any authenticated user
pub async fn protected(CurrentUser(_user): CurrentUser) -> Json<MessageResponse> {
    Json(MessageResponse::new("Authenticated!"))
}

/// Members of the `Admin` group only
pub async fn admin(AdminUser(_user): AdminUser) -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome, Admin!"))
}
