//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`page_fetcher`] - Outbound page fetching contract
//!
//! Repository and fetcher traits are implemented by the infrastructure layer;
//! business logic lives in [`crate::application::services`].

pub mod entities;
pub mod page_fetcher;
pub mod repositories;
