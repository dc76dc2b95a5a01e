//! Application Layer
//!
//! Business logic services and data transfer objects (DTOs). This layer
//! sits between the HTTP handlers and the domain repositories.

pub mod dto;
pub mod services;
