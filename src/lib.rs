//! # Blog API Library
//!
//! This crate provides a blogging backend with:
//! - RESTful HTTP API for users, posts and comments
//! - Bearer token authentication (JWT) and argon2 password hashing
//! - Author/admin ownership permissions
//! - PostgreSQL storage, with an in-memory backend for development and tests
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core entities, repository traits and permission rules
//! - **Application Layer**: Services and DTOs
//! - **Infrastructure Layer**: Database repositories and metrics
//! - **Presentation Layer**: HTTP routes, handlers, extractors and middleware
//!
//! ## Module Structure
//!
//! ```text
//! blog_api/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, repository traits, permission rules
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database, in-memory store and metrics
//! +-- presentation/   HTTP routes, handlers and middleware
//! +-- shared/         Common utilities (errors, validation, snowflake IDs)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
