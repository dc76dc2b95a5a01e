//! # Domain Entities
//!
//! Core domain entities. All entities map directly to their database tables.
//!
//! - **User**: account with credentials and group membership
//! - **Post**: a blog post owned by its author
//! - **Comment**: a comment on a post, owned by its author
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod comment;
mod post;
mod user;

pub use comment::{Comment, CommentRepository};
pub use post::{Post, PostRepository};
pub use user::{User, UserRepository, ADMIN_GROUP};

#[cfg(test)]
pub use comment::MockCommentRepository;
#[cfg(test)]
pub use post::MockPostRepository;
#[cfg(test)]
pub use user::MockUserRepository;
