//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, the page fetcher and the Axum
//! server lifecycle.

use crate::config::Config;
use crate::domain::page_fetcher::PageFetcher;
use crate::infrastructure::http::ReqwestPageFetcher;
use crate::infrastructure::persistence::Database;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - HTTP client for page checks
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let database = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(database.pool())
        .await
        .context("Failed to migrate")?;

    let fetcher: Arc<dyn PageFetcher> = Arc::new(ReqwestPageFetcher::from_config(&config)?);

    let state = AppState::new(database, fetcher, &config.secret_key);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
