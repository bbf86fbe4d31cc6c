//! Url registration, listing and detail handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};

use crate::application::services::Registration;
use crate::domain::entities::{Check, Url, UrlListing};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::dto::UrlForm;
use crate::web::extract::UrlId;
use crate::web::flash::{Flash, IncomingFlashes, redirect_with_flash, render_with_flashes};
use crate::web::handlers::IndexTemplate;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn format_date(at: DateTime<Utc>) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// One row of the listing table.
pub struct UrlRowView {
    pub id: i64,
    pub name: String,
    pub last_check_at: String,
    pub last_status_code: String,
}

impl From<UrlListing> for UrlRowView {
    fn from(listing: UrlListing) -> Self {
        Self {
            id: listing.id,
            name: listing.name,
            last_check_at: listing.last_check_at.map(format_date).unwrap_or_default(),
            last_status_code: listing
                .last_status_code
                .map(|code| code.to_string())
                .unwrap_or_default(),
        }
    }
}

pub struct UrlView {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

impl From<Url> for UrlView {
    fn from(url: Url) -> Self {
        Self {
            id: url.id,
            name: url.name,
            created_at: format_date(url.created_at),
        }
    }
}

pub struct CheckView {
    pub id: i64,
    pub status_code: String,
    pub h1: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

impl From<Check> for CheckView {
    fn from(check: Check) -> Self {
        Self {
            id: check.id,
            status_code: check
                .status_code
                .map(|code| code.to_string())
                .unwrap_or_default(),
            h1: check.h1.unwrap_or_default(),
            title: check.title.unwrap_or_default(),
            description: check.description.unwrap_or_default(),
            created_at: format_date(check.created_at),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "urls.html")]
pub struct UrlsTemplate {
    pub flashes: Vec<Flash>,
    pub urls: Vec<UrlRowView>,
}

#[derive(Template, WebTemplate)]
#[template(path = "url.html")]
pub struct UrlTemplate {
    pub flashes: Vec<Flash>,
    pub url: UrlView,
    pub checks: Vec<CheckView>,
}

/// Registers a Url from the index form.
///
/// # Endpoint
///
/// `POST /urls` (form field `url`)
///
/// # Responses
///
/// - **303 See Other** to `/urls/{id}` with a success flash when created
/// - **303 See Other** to `/urls/{id}` with an info flash when already registered
/// - **422 Unprocessable Entity** with the index page and a danger flash when
///   the input is not a valid URL
pub async fn create_url_handler(
    State(state): State<AppState>,
    Form(form): Form<UrlForm>,
) -> Result<Response, AppError> {
    if let Some(message) = form.first_error() {
        return Ok(invalid_input(form.url, message));
    }

    let registration = match state.url_service.register(&form.url).await {
        Ok(registration) => registration,
        Err(AppError::Validation { message }) => return Ok(invalid_input(form.url, message)),
        Err(e) => return Err(e),
    };

    let flash = match registration {
        Registration::Created(_) => Flash::success("Page successfully added"),
        Registration::AlreadyExists(_) => Flash::info("Page already exists"),
    };

    Ok(redirect_with_flash(
        &state.flash_signer,
        &format!("/urls/{}", registration.id()),
        flash,
    ))
}

fn invalid_input(url: String, message: String) -> Response {
    tracing::info!(%url, %message, "Rejected Url input");
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        IndexTemplate {
            flashes: vec![Flash::danger(message)],
            url,
        },
    )
        .into_response()
}

/// Lists registered Urls with their latest check.
///
/// # Endpoint
///
/// `GET /urls`
pub async fn list_urls_handler(
    State(state): State<AppState>,
    flashes: IncomingFlashes,
) -> Result<Response, AppError> {
    let urls = state.url_service.list_urls().await?;
    let incoming = !flashes.is_empty();

    Ok(render_with_flashes(
        incoming,
        UrlsTemplate {
            flashes: flashes.into_inner(),
            urls: urls.into_iter().map(UrlRowView::from).collect(),
        },
    ))
}

/// Shows a Url and its checks, newest first.
///
/// # Endpoint
///
/// `GET /urls/{id}`
///
/// # Errors
///
/// Returns [`AppError::NotFound`] (404 page) for an unknown or non-numeric id.
pub async fn show_url_handler(
    State(state): State<AppState>,
    UrlId(id): UrlId,
    flashes: IncomingFlashes,
) -> Result<Response, AppError> {
    let url = state.url_service.get_url(id).await?;
    let checks = state.url_service.get_url_checks(id).await?;
    let incoming = !flashes.is_empty();

    Ok(render_with_flashes(
        incoming,
        UrlTemplate {
            flashes: flashes.into_inner(),
            url: url.into(),
            checks: checks.into_iter().map(CheckView::from).collect(),
        },
    ))
}
