//! Url registration and retrieval service.

use std::sync::Arc;

use crate::domain::entities::{Check, Url, UrlListing};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::url_normalizer::validate_and_normalize;

/// Outcome of registering a Url.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A new Url was stored with this id.
    Created(i64),
    /// The normalized Url was already registered under this id.
    AlreadyExists(i64),
}

impl Registration {
    pub fn id(self) -> i64 {
        match self {
            Registration::Created(id) | Registration::AlreadyExists(id) => id,
        }
    }
}

/// Service for registering and reading Urls.
///
/// Input is validated and reduced to its origin before it reaches the
/// repository, so `https://Example.com/a` and `https://example.com/b` register
/// the same Url.
pub struct UrlService<R: UrlRepository> {
    repository: Arc<R>,
}

impl<R: UrlRepository> UrlService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a Url from raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with a user-facing message if the input
    /// is not a valid URL, and [`AppError::Internal`] on storage failures.
    pub async fn register(&self, input: &str) -> Result<Registration, AppError> {
        let name =
            validate_and_normalize(input).map_err(|e| AppError::bad_request(e.to_string()))?;

        if let Some(id) = self.repository.check_url(&name).await? {
            tracing::info!(url_id = id, %name, "Url is already registered");
            return Ok(Registration::AlreadyExists(id));
        }

        match self.repository.create_url(&name).await {
            Ok(id) => Ok(Registration::Created(id)),
            // Lost a race with a concurrent registration of the same name.
            Err(e) if e.is_unique_violation() => {
                let id = self
                    .repository
                    .check_url(&name)
                    .await?
                    .ok_or_else(|| AppError::internal("Url vanished after unique violation"))?;
                Ok(Registration::AlreadyExists(id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns a Url by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no Url has this id.
    pub async fn get_url(&self, id: i64) -> Result<Url, AppError> {
        self.repository
            .get_url(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Url {id} not found")))
    }

    /// Lists every Url with its latest check, newest Url first.
    pub async fn list_urls(&self) -> Result<Vec<UrlListing>, AppError> {
        Ok(self.repository.get_urls().await?)
    }

    /// Lists the checks of a Url, newest first.
    pub async fn get_url_checks(&self, url_id: i64) -> Result<Vec<Check>, AppError> {
        Ok(self.repository.get_url_checks(url_id).await?)
    }
}
