//! Request and response types of the web layer.
//!
//! Form payloads derive `validator::Validate` for a first pass on shape;
//! URL semantics are checked by the service.

pub mod health;
pub mod url_form;

pub use health::{CheckStatus, HealthChecks, HealthResponse};
pub use url_form::UrlForm;
