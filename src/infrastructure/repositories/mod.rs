//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use blog_api::infrastructure::repositories::{
//!     PgCommentRepository, PgPostRepository, PgUserRepository,
//! };
//!
//! fn setup_repositories(pool: PgPool) {
//!     let users = PgUserRepository::new(pool.clone());
//!     let posts = PgPostRepository::new(pool.clone());
//!     let comments = PgCommentRepository::new(pool);
//! }
//! ```

pub mod comment_repository;
pub mod post_repository;
pub mod user_repository;

pub use comment_repository::PgCommentRepository;
pub use post_repository::PgPostRepository;
pub use user_repository::PgUserRepository;
