//! Business logic services for the application layer.

pub mod check_service;
pub mod url_service;

pub use check_service::CheckService;
pub use url_service::{Registration, UrlService};
