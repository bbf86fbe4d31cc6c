//! Request extractors shared by the page handlers.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// Url id taken from the `{id}` route segment.
///
/// A segment that is not an integer names no Url, so it is rejected with the
/// not-found page instead of axum's plain-text 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlId(pub i64);

impl<S> FromRequestParts<S> for UrlId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(UrlId(id)),
            Err(rejection) => {
                tracing::debug!(path = %parts.uri.path(), error = %rejection, "Rejected Url id");
                Err(AppError::not_found("Url not found"))
            }
        }
    }
}
