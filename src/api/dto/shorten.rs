//! DTOs for the short URL creation endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ShortUrl;

/// Form body of `POST /api/shorturl`.
///
/// A missing `url` field is treated as an empty value so it fails URL
/// validation like any other malformed input.
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub url: String,
}

/// Mapping returned on success.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: i64,
}

impl From<ShortUrl> for ShortenResponse {
    fn from(record: ShortUrl) -> Self {
        Self {
            original_url: record.original_url,
            short_url: record.short_url,
        }
    }
}
