//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{CheckService, UrlService};
use crate::domain::page_fetcher::PageFetcher;
use crate::infrastructure::persistence::{Database, PgUrlRepository};
use crate::web::flash::FlashSigner;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<PgUrlRepository>>,
    pub check_service: Arc<CheckService<PgUrlRepository, dyn PageFetcher>>,
    pub flash_signer: FlashSigner,
    pub database: Database,
}

impl AppState {
    /// Wires the services around one database handle and page fetcher.
    pub fn new(database: Database, fetcher: Arc<dyn PageFetcher>, secret_key: &str) -> Self {
        let repository = Arc::new(PgUrlRepository::new(database.clone()));

        Self {
            url_service: Arc::new(UrlService::new(repository.clone())),
            check_service: Arc::new(CheckService::new(repository, fetcher)),
            flash_signer: FlashSigner::new(secret_key),
            database,
        }
    }
}
