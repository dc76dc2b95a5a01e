//! # Domain Services
//!
//! Domain services encapsulate rules that don't belong to a single entity.
//!
//! - **PermissionService**: author/admin ownership checks

mod permission_service;

pub use permission_service::*;
