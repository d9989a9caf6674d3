//! Handler for the short URL creation endpoint.

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::api::dto::shorten::{ShortenForm, ShortenResponse};
use crate::state::AppState;

/// Creates a short URL, or returns the existing one for the same URL.
///
/// # Endpoint
///
/// `POST /api/shorturl` with a form-encoded body.
///
/// # Request Body
///
/// ```text
/// url=https://www.freecodecamp.org
/// ```
///
/// # Response
///
/// ```json
/// { "original_url": "https://www.freecodecamp.org", "short_url": 1 }
/// ```
///
/// # Errors
///
/// - `{"error": "Invalid URL"}` / `{"error": "Invalid hostname"}` with status
///   200, or 400 when legacy status codes are disabled
/// - 500 `{"error": "Internal server error"}` on storage failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    Form(form): Form<ShortenForm>,
) -> Response {
    match state.short_url_service.shorten(&form.url).await {
        Ok(record) => Json(ShortenResponse::from(record)).into_response(),
        Err(err) => err.into_response_with(state.legacy_status_codes),
    }
}
