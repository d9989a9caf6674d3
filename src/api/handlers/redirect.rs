//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::location::location_header;

/// Redirects a short URL to its original target.
///
/// # Endpoint
///
/// `GET /api/shorturl/{short_url}`
///
/// # Response Codes
///
/// - **302 Found**: `Location` holds the original URL, percent-encoded where
///   header values require it
/// - **404 Not Found**: unknown or non-numeric identifier
/// - **500 Internal Server Error**: `{"error": "Server error"}`
pub async fn redirect_handler(
    Path(short_url): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let record = state.short_url_service.resolve(&short_url).await?;

    let location = location_header(&record.original_url);

    debug!(short_url = record.short_url, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
