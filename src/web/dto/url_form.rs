use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// Form posted by the index page.
///
/// Only presence is checked here; length and syntax are checked by
/// [`UrlService::register`](crate::application::services::UrlService::register).
#[derive(Debug, Deserialize, Validate)]
pub struct UrlForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
}

impl UrlForm {
    /// Validates the form and returns the first error message, if any.
    pub fn first_error(&self) -> Option<String> {
        self.validate().err().map(|errors| first_message(&errors))
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid URL".to_string())
}
