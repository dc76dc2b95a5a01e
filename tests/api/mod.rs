//! REST API endpoint tests

mod admin_tests;
mod auth_tests;
mod health_tests;
mod post_tests;
mod user_tests;
