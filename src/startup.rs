//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;

use crate::application::services::{
    auth_service::hash_password, AuthServiceImpl, CommentServiceImpl, PostServiceImpl,
    UserServiceImpl,
};
use crate::config::{Settings, StorageBackend};
use crate::domain::{CommentRepository, PostRepository, User, UserRepository, ADMIN_GROUP};
use crate::infrastructure::database;
use crate::infrastructure::memory::InMemoryStore;
use crate::infrastructure::repositories::{
    PgCommentRepository, PgPostRepository, PgUserRepository,
};
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub snowflake: Arc<SnowflakeGenerator>,
    pub settings: Arc<Settings>,
    /// Present only for the PostgreSQL backend; used by readiness checks.
    pub db: Option<PgPool>,
}

impl AppState {
    /// State backed by PostgreSQL repositories.
    pub fn postgres(pool: PgPool, settings: Settings) -> Self {
        Self::with_repositories(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgPostRepository::new(pool.clone())),
            Arc::new(PgCommentRepository::new(pool.clone())),
            settings,
            Some(pool),
        )
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(settings: Settings) -> Self {
        let store = InMemoryStore::new();
        Self::with_repositories(
            Arc::new(store.users()),
            Arc::new(store.posts()),
            Arc::new(store.comments()),
            settings,
            None,
        )
    }

    fn with_repositories(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        settings: Settings,
        db: Option<PgPool>,
    ) -> Self {
        let snowflake = Arc::new(SnowflakeGenerator::new(
            settings.snowflake.machine_id,
            settings.snowflake.epoch,
        ));

        Self {
            users,
            posts,
            comments,
            snowflake,
            settings: Arc::new(settings),
            db,
        }
    }

    pub fn auth_service(&self) -> AuthServiceImpl {
        AuthServiceImpl::new(self.users.clone(), self.settings.jwt.clone())
    }

    pub fn user_service(&self) -> UserServiceImpl {
        UserServiceImpl::new(self.users.clone(), self.snowflake.clone())
    }

    pub fn post_service(&self) -> PostServiceImpl {
        PostServiceImpl::new(self.posts.clone(), self.snowflake.clone())
    }

    pub fn comment_service(&self) -> CommentServiceImpl {
        CommentServiceImpl::new(
            self.comments.clone(),
            self.posts.clone(),
            self.snowflake.clone(),
        )
    }
}

/// Make sure the configured admin account exists and is in the `Admin` group.
pub async fn bootstrap_admin(state: &AppState) -> Result<()> {
    let Some((username, password)) = state.settings.admin.credentials() else {
        return Ok(());
    };

    let user = match state.users.find_by_username(username).await? {
        Some(user) => user,
        None => {
            let password_hash = hash_password(password)?;
            let user = User::new(
                state.snowflake.generate(),
                username.to_string(),
                state.settings.admin.email.clone().unwrap_or_default(),
                password_hash,
            );
            state.users.create(&user).await?
        }
    };

    if !user.is_admin() {
        state.users.add_to_group(user.id, ADMIN_GROUP).await?;
    }

    tracing::info!(user_id = user.id, username, "Admin account ready");
    Ok(())
}

/// Build the full router with its middleware stack.
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state)
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let state = match settings.database.backend {
            StorageBackend::Postgres => {
                let db = database::create_pool(&settings.database)
                    .await
                    .context("Failed to connect to PostgreSQL")?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&db).await?;
                    tracing::info!("Database migrations applied");
                }

                AppState::postgres(db, settings)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                AppState::in_memory(settings)
            }
        };

        bootstrap_admin(&state).await?;

        let addr = state
            .settings
            .server
            .socket_addr()
            .with_context(|| format!("Invalid bind address {}", state.settings.server_addr()))?;
        let router = build_router(state);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Server stopped");
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
