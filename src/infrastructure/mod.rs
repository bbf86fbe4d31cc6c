//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL storage and the query builder
//! - [`http`] - Page fetching over HTTP and HTML extraction

pub mod http;
pub mod persistence;
