//! Repository trait for Url and Check data access.

use crate::domain::entities::{Check, NewCheck, Url, UrlListing};
use crate::error::StorageError;
use async_trait::async_trait;

/// Repository interface for registered URLs and their checks.
///
/// Every method distinguishes three outcomes: success, not found (`Ok(None)`
/// or an empty list) and storage failure (`Err`).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Stores a new Url and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on database errors, including a unique
    /// violation when the name is already registered.
    async fn create_url(&self, name: &str) -> Result<i64, StorageError>;

    /// Looks up a Url id by its normalized name.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(id))` if registered
    /// - `Ok(None)` if not registered
    async fn check_url(&self, name: &str) -> Result<Option<i64>, StorageError>;

    /// Fetches a Url by id.
    async fn get_url(&self, id: i64) -> Result<Option<Url>, StorageError>;

    /// Lists every Url, newest first, each with its most recent check.
    async fn get_urls(&self) -> Result<Vec<UrlListing>, StorageError>;

    /// Records a check for an existing Url and returns the check id.
    async fn create_check(&self, url_id: i64, check: NewCheck) -> Result<i64, StorageError>;

    /// Lists the checks of a Url, newest first.
    async fn get_url_checks(&self, url_id: i64) -> Result<Vec<Check>, StorageError>;
}
