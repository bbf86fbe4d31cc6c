//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; the PostgreSQL implementation lives
//! in `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for service tests.

pub mod url_repository;

pub use url_repository::UrlRepository;

#[cfg(test)]
pub use url_repository::MockUrlRepository;
