//! # Blog API
//!
//! Binary entry point. Configuration comes from `config/*.toml`, `APP__*`
//! variables and a handful of plain variables such as `DATABASE_URL` and
//! `JWT_SECRET`; see [`blog_api::config::Settings::load`].

use anyhow::{Context, Result};

use blog_api::config::Settings;
use blog_api::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    blog_api::telemetry::init_tracing();

    let settings = Settings::load().context("Failed to load configuration")?;
    tracing::info!(
        environment = %settings.environment,
        backend = ?settings.database.backend,
        admin_bootstrap = settings.admin.credentials().is_some(),
        "Starting Blog API v{}",
        env!("CARGO_PKG_VERSION"),
    );

    let application = Application::build(settings).await?;
    tracing::info!(addr = %application.local_addr()?, "Server ready to accept connections");

    application.run_until_stopped().await
}
