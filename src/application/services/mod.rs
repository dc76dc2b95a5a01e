//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Password hashing, login and bearer tokens
//! - **UserService**: Registration, profiles and group membership
//! - **PostService**: Post CRUD
//! - **CommentService**: Comment CRUD

pub mod auth_service;
pub mod comment_service;
pub mod post_service;
pub mod user_service;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl, AuthToken, Claims};
pub use comment_service::{CommentError, CommentService, CommentServiceImpl};
pub use post_service::{PostError, PostService, PostServiceImpl};
pub use user_service::{UserError, UserService, UserServiceImpl};
