//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/`, `/urls/*`, `/health` - see [`crate::web::routes`]
//! - `/static/*`               - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::state::AppState;
use crate::web;
use crate::web::middleware::tracing;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = web::routes::routes()
        .nest_service("/static", ServeDir::new("static"))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn not_found_handler() -> crate::error::AppError {
    crate::error::AppError::not_found("No route")
}
