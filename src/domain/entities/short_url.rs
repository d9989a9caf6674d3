//! Short URL entity.

use chrono::{DateTime, Utc};

use crate::error::AppError;

/// A stored mapping between a numeric identifier and the submitted URL.
///
/// Records are immutable once inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub short_url: i64,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    pub fn new(short_url: i64, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            short_url,
            original_url,
            created_at,
        }
    }
}

/// Input data for inserting a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub short_url: i64,
    pub original_url: String,
}

/// Parses an identifier taken from a request path.
///
/// Only plain decimal digits are accepted, and the value must be positive.
/// Anything else can never match a stored record, so it is reported as
/// [`AppError::NotFound`].
pub fn parse_short_url_id(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::NotFound);
    }

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::NotFound),
    }
}
