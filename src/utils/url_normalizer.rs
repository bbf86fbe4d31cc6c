//! URL validation and normalization.
//!
//! Registered pages are identified by their origin: two inputs that differ
//! only in path, query, fragment, case or default port name the same page.

use url::{Host, Url};

/// Maximum length of a URL accepted for registration, matching `urls.name`.
pub const MAX_URL_LENGTH: usize = 255;

/// Errors that can occur while validating user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Empty,

    #[error("URL exceeds 255 characters")]
    TooLong,

    #[error("Invalid URL")]
    Invalid,
}

/// Validates raw user input as an absolute HTTP(S) URL.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for blank input
/// - [`UrlValidationError::TooLong`] above [`MAX_URL_LENGTH`] characters
/// - [`UrlValidationError::Invalid`] when the input does not parse, has a
///   scheme other than `http`/`https`, or its host is neither an IP address
///   nor a domain with a top-level label (`localhost` is rejected)
pub fn validate_url(input: &str) -> Result<Url, UrlValidationError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if input.chars().count() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let url = Url::parse(input).map_err(|_| UrlValidationError::Invalid)?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlValidationError::Invalid);
    }
    match url.host() {
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => Ok(url),
        Some(Host::Domain(domain)) if is_qualified_domain(domain) => Ok(url),
        _ => Err(UrlValidationError::Invalid),
    }
}

fn is_qualified_domain(domain: &str) -> bool {
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let labels: Vec<&str> = domain.split('.').collect();

    let Some(tld) = labels.last() else {
        return false;
    };

    labels.len() >= 2
        && labels.iter().all(|label| !label.is_empty())
        && tld.len() >= 2
        && !tld.chars().all(|c| c.is_ascii_digit())
}

/// Reduces a validated URL to `scheme://host[:port]`.
///
/// The scheme and host are lowercased by the parser; default ports are
/// dropped, other ports are kept.
pub fn normalize_url(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    }
}

/// Validates and normalizes in one step.
pub fn validate_and_normalize(input: &str) -> Result<String, UrlValidationError> {
    validate_url(input).map(|url| normalize_url(&url))
}
