//! Check trigger handler.

use axum::{extract::State, response::Response};

use crate::error::AppError;
use crate::state::AppState;
use crate::web::extract::UrlId;
use crate::web::flash::{Flash, redirect_with_flash};

/// Runs a check for a Url and redirects back to its page.
///
/// # Endpoint
///
/// `POST /urls/{id}/checks`
///
/// # Responses
///
/// - **303 See Other** with a success flash when the check is recorded
/// - **303 See Other** with an info flash when the site could not be fetched
/// - **404 Not Found** page for an unknown or non-numeric id
pub async fn create_check_handler(
    State(state): State<AppState>,
    UrlId(id): UrlId,
) -> Result<Response, AppError> {
    let location = format!("/urls/{id}");

    match state.check_service.run_check(id).await {
        Ok(_) => Ok(redirect_with_flash(
            &state.flash_signer,
            &location,
            Flash::success("Page successfully checked"),
        )),
        Err(AppError::Fetch(e)) => {
            tracing::warn!(url_id = id, error = %e, "Check failed");
            Ok(redirect_with_flash(
                &state.flash_signer,
                &location,
                Flash::info("An error occurred during the check"),
            ))
        }
        Err(e) => Err(e),
    }
}
