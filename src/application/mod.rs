//! Application layer services implementing business logic.
//!
//! Services consume repository and fetcher traits and provide a clean API for
//! HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Url registration and retrieval
//! - [`services::check_service::CheckService`] - Page checks
//!
//! # Example
//!
//! ```rust,ignore
//! let service = UrlService::new(Arc::new(repository));
//! match service.register("https://example.com/page").await? {
//!     Registration::Created(id) => println!("added {id}"),
//!     Registration::AlreadyExists(id) => println!("already known as {id}"),
//! }
//! ```

pub mod services;
