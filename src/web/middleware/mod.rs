//! Web-layer middleware.

pub mod tracing;
