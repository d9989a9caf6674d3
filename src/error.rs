//! Application error type and its HTTP mapping.
//!
//! Every error body has the legacy shape `{"error": "<message>"}`. Validation
//! failures are reported with `200 OK` unless strict status codes are enabled
//! (see [`AppError::into_response_with`]).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Public message for storage failures during creation.
pub const CREATE_FAILURE_MESSAGE: &str = "Internal server error";

/// Public message for storage failures during resolution.
pub const LOOKUP_FAILURE_MESSAGE: &str = "Server error";

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Submitted value is not an `http(s)://` URL with a host.
    #[error("Invalid URL")]
    InvalidUrlFormat,

    /// Hostname did not resolve, or resolution timed out.
    #[error("Invalid hostname")]
    UnresolvableHostname,

    /// No record for the requested identifier.
    #[error("No short URL found for the given input")]
    NotFound,

    /// Insert rejected by a unique index. Recovered inside the service.
    #[error("Unique constraint violation on {constraint}")]
    UniqueViolation { constraint: String },

    /// Storage failure while creating a record.
    #[error("Storage failure: {0}")]
    Storage(String),

    /// Storage failure while resolving an identifier.
    #[error("Lookup failure: {0}")]
    Lookup(String),
}

impl AppError {
    /// Re-labels a storage failure as a resolution failure.
    pub fn into_lookup(self) -> Self {
        match self {
            Self::Storage(message) => Self::Lookup(message),
            Self::UniqueViolation { constraint } => {
                Self::Lookup(format!("unexpected unique violation on {constraint}"))
            }
            other => other,
        }
    }

    fn status(&self, legacy_status_codes: bool) -> StatusCode {
        match self {
            Self::InvalidUrlFormat | Self::UnresolvableHostname => {
                if legacy_status_codes {
                    StatusCode::OK
                } else {
                    StatusCode::BAD_REQUEST
                }
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UniqueViolation { .. } | Self::Storage(_) | Self::Lookup(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::UniqueViolation { .. } | Self::Storage(_) => CREATE_FAILURE_MESSAGE.to_string(),
            Self::Lookup(_) => LOOKUP_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Builds the HTTP response, choosing between the legacy `200` and a `400`
    /// for validation failures.
    ///
    /// Internal details are logged here and never sent to the client.
    pub fn into_response_with(self, legacy_status_codes: bool) -> Response {
        let status = self.status(legacy_status_codes);

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(true)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::UniqueViolation {
                constraint: db.constraint().unwrap_or("unknown").to_string(),
            };
        }

        AppError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_url_uses_legacy_status() {
        let response = AppError::InvalidUrlFormat.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["error"], "Invalid URL");
    }

    #[tokio::test]
    async fn test_invalid_hostname_strict_status() {
        let response = AppError::UnresolvableHostname.into_response_with(false);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid hostname");
    }

    #[tokio::test]
    async fn test_not_found_ignores_legacy_flag() {
        let response = AppError::NotFound.into_response_with(true);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await["error"],
            "No short URL found for the given input"
        );
    }

    #[tokio::test]
    async fn test_storage_error_hides_details() {
        let response = AppError::Storage("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_lookup_error_message() {
        let response = AppError::Storage("pool timed out".to_string())
            .into_lookup()
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Server error");
    }

    #[test]
    fn test_into_lookup_keeps_client_errors() {
        assert!(matches!(AppError::NotFound.into_lookup(), AppError::NotFound));
        assert!(matches!(
            AppError::InvalidUrlFormat.into_lookup(),
            AppError::InvalidUrlFormat
        ));
    }
}
