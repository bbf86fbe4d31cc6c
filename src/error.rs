use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::page_fetcher::FetchError;

/// Failure of the storage layer.
///
/// Storage errors are always propagated to the caller. A query that matches no
/// rows is not an error; repositories report it as `Ok(None)` or an empty list.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The database driver rejected the statement or the connection failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The statement could not be assembled.
    #[error("invalid query: {0}")]
    InvalidQuery(&'static str),

    /// An `INSERT ... RETURNING` produced no row.
    #[error("insert returned no row")]
    MissingReturning,
}

impl StorageError {
    /// Returns true if the error is a unique constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StorageError::Database(e) => e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation()),
            _ => false,
        }
    }
}

/// Application-level error returned by services and handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        tracing::error!(error = %e, "Storage failure");
        AppError::internal("Database error")
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "errors/404.html")]
struct NotFoundTemplate {}

#[derive(Template, WebTemplate)]
#[template(path = "errors/500.html")]
struct ServerErrorTemplate {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation { message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message).into_response()
            }
            AppError::NotFound { message } => {
                tracing::info!(%message, "Not found");
                (StatusCode::NOT_FOUND, NotFoundTemplate {}).into_response()
            }
            AppError::Fetch(e) => (StatusCode::BAD_GATEWAY, e.to_string()).into_response(),
            AppError::Internal { message } => {
                tracing::error!(%message, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, ServerErrorTemplate {}).into_response()
            }
        }
    }
}
