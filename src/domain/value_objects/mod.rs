//! # Domain Value Objects
//!
//! Immutable value types that represent domain concepts without identity.
//!
//! - **Page**: offset/limit window for list queries

mod page;

pub use page::*;
