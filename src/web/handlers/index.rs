//! Index page with the Url registration form.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::Response;

use crate::web::flash::{Flash, IncomingFlashes, render_with_flashes};

/// Template for the index page.
///
/// `url` pre-fills the input when the form is re-rendered after a
/// validation error.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub flashes: Vec<Flash>,
    pub url: String,
}

/// Renders the index page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(flashes: IncomingFlashes) -> Response {
    let incoming = !flashes.is_empty();
    render_with_flashes(
        incoming,
        IndexTemplate {
            flashes: flashes.into_inner(),
            url: String::new(),
        },
    )
}
