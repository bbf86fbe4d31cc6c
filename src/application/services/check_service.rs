//! Page check service.

use std::sync::Arc;

use crate::domain::entities::{NewCheck, Url};
use crate::domain::page_fetcher::PageFetcher;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::http::extract_page_summary;

/// Runs checks: fetches the page of a registered Url, extracts its metadata
/// and records the result.
///
/// A failed fetch is reported as [`AppError::Fetch`] and records nothing.
pub struct CheckService<R: UrlRepository, F: PageFetcher + ?Sized> {
    repository: Arc<R>,
    fetcher: Arc<F>,
}

impl<R: UrlRepository, F: PageFetcher + ?Sized> CheckService<R, F> {
    pub fn new(repository: Arc<R>, fetcher: Arc<F>) -> Self {
        Self {
            repository,
            fetcher,
        }
    }

    /// Checks the Url with the given id and returns the new check id.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the Url does not exist
    /// - [`AppError::Fetch`] if the page could not be fetched
    /// - [`AppError::Internal`] on storage failures
    pub async fn run_check(&self, url_id: i64) -> Result<i64, AppError> {
        let url: Url = self
            .repository
            .get_url(url_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Url {url_id} not found")))?;

        let page = self.fetcher.fetch(&url.name).await?;
        let summary = extract_page_summary(&page.body);

        let check_id = self
            .repository
            .create_check(url.id, NewCheck::from_page(page.status_code, summary))
            .await?;

        tracing::info!(url_id, check_id, status = page.status_code, "Check recorded");
        Ok(check_id)
    }
}
