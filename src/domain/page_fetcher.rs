//! Contract for fetching the page of a registered Url.

use async_trait::async_trait;

/// A successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status_code: u16,
    pub body: String,
}

/// Failure to obtain a usable page.
///
/// Kept apart from storage errors: an unreachable site is an expected outcome
/// of a check, not a server failure.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
}

/// Fetches pages over HTTP.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns its status and body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails, times out, or the response
    /// status is not a success.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
