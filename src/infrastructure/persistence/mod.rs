//! PostgreSQL storage.
//!
//! # Modules
//!
//! - [`query`] - Injection-safe `SELECT` / `INSERT` builder
//! - [`database`] - Pool handle and per-unit-of-work sessions
//! - [`pg_url_repository`] - [`UrlRepository`](crate::domain::repositories::UrlRepository) implementation

pub mod database;
pub mod pg_url_repository;
pub mod query;

pub use crate::error::StorageError;
pub use database::{Database, Session};
pub use pg_url_repository::PgUrlRepository;
