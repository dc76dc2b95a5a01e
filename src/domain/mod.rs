//! # Domain Layer
//!
//! The domain layer contains the core rules of the blog.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: User, Post, Comment and their repository traits
//! - **value_objects**: Immutable value types (pagination)
//! - **services**: Permission rules

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
pub use value_objects::*;
