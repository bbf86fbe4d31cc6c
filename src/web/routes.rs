//! Page and health route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    create_check_handler, create_url_handler, health_handler, index_handler, list_urls_handler,
    show_url_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Application routes.
///
/// # Endpoints
///
/// - `GET  /` - Registration form
/// - `POST /urls` - Register a Url
/// - `GET  /urls` - Url listing with the latest check of each
/// - `GET  /urls/{id}` - Url detail with its checks
/// - `POST /urls/{id}/checks` - Run a check
/// - `GET  /health` - Health check
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/urls", get(list_urls_handler).post(create_url_handler))
        .route("/urls/{id}", get(show_url_handler))
        .route("/urls/{id}/checks", post(create_check_handler))
        .route("/health", get(health_handler))
}
