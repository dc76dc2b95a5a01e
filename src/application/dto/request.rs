//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;
use validator::Validate;

use crate::shared::validation::{validate_not_blank, validate_optional_email, validate_username};

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub username: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(
        length(max = 254, message = "Email must be at most 254 characters"),
        custom(function = "validate_optional_email")
    )]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Partial user update
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(
        length(min = 1, max = 150, message = "Username must be 1-150 characters"),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,

    #[validate(
        length(max = 254, message = "Email must be at most 254 characters"),
        custom(function = "validate_optional_email")
    )]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: Option<String>,
}

/// Group membership request
#[derive(Debug, Deserialize, Validate)]
pub struct AddGroupRequest {
    #[validate(
        length(min = 1, max = 150, message = "Group name must be 1-150 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
}

/// Create post request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(
        length(min = 1, max = 10000, message = "Content must be 1-10000 characters"),
        custom(function = "validate_not_blank")
    )]
    pub content: String,
}

/// Partial post update
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(
        length(min = 1, max = 10000, message = "Content must be 1-10000 characters"),
        custom(function = "validate_not_blank")
    )]
    pub content: Option<String>,
}

/// Create comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(
        length(min = 1, max = 2000, message = "Content must be 1-2000 characters"),
        custom(function = "validate_not_blank")
    )]
    pub content: String,
}

/// Partial comment update
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(
        length(min = 1, max = 2000, message = "Content must be 1-2000 characters"),
        custom(function = "validate_not_blank")
    )]
    pub content: Option<String>,
}
