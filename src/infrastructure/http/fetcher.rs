use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, redirect::Policy};

use crate::config::Config;
use crate::domain::page_fetcher::{FetchError, FetchedPage, PageFetcher};

/// Fetches pages with a shared `reqwest` client.
#[derive(Clone)]
pub struct ReqwestPageFetcher {
    http: Client,
}

impl ReqwestPageFetcher {
    /// Builds the client with the given request timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .redirect(Policy::limited(8))
            .timeout(timeout)
            .build()?;

        Ok(Self { http })
    }

    /// Builds the client from `FETCH_TIMEOUT_SECONDS` and `FETCH_USER_AGENT`.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            Duration::from_secs(config.fetch_timeout_seconds),
            &config.fetch_user_agent,
        )
    }
}

#[async_trait]
impl PageFetcher for ReqwestPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "Page responded with an error status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        tracing::info!(url, status = status.as_u16(), "The response from the site was received");
        Ok(FetchedPage {
            status_code: status.as_u16(),
            body,
        })
    }
}

fn map_reqwest_error(url: &str, e: reqwest::Error) -> FetchError {
    tracing::warn!(url, error = %e, "Error when requesting the site");
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}
