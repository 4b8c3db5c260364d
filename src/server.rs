//! HTTP server initialization and runtime setup.
//!
//! Handles database connection, storage backend selection, and the Axum
//! server lifecycle.

use crate::config::Config;
use crate::error;
use crate::infrastructure::persistence::{FallbackConfigRepository, PgConfigRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (when configured)
/// - Storage adapter, in-memory when PostgreSQL is absent or fails to start
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if the listen address is invalid, the bind fails, or
/// the server hits a runtime error. Database problems never fail startup.
pub async fn run(config: Config) -> Result<()> {
    error::set_expose_internal_details(config.is_development());

    let repository = Arc::new(build_repository(&config).await);
    let state = AppState::new(repository, config.public_base_url.clone());

    let app = app_router(state, &config.cors_origins);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Selects the storage backend for this process.
///
/// Falls back to the in-memory store when no database is configured or
/// when connecting or migrating fails.
pub async fn build_repository(config: &Config) -> FallbackConfigRepository {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("No database configured; configurations will be lost on restart");
        return FallbackConfigRepository::memory_only();
    };

    match connect(database_url, config).await {
        Ok(pool) => {
            tracing::info!("Storage backend: PostgreSQL");
            let primary = PgConfigRepository::new(Arc::new(pool), config.store_timeout());
            FallbackConfigRepository::new(Arc::new(primary))
        }
        Err(e) => {
            tracing::error!(
                error = %format!("{e:#}"),
                "PostgreSQL unavailable at startup; using in-memory storage"
            );
            metrics::counter!("store_fallback_total", "operation" => "startup").increment(1);
            FallbackConfigRepository::memory_only()
        }
    }
}

/// Connects the pool and applies pending migrations.
async fn connect(database_url: &str, config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
