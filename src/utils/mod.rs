//! Utility functions shared by the services and the admin CLI.
//!
//! - [`url_normalizer`] - URL validation and normalization

pub mod url_normalizer;
