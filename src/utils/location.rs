//! Encoding of stored URLs for the `Location` header.
//!
//! Stored URLs are kept exactly as submitted and may contain bytes that are
//! not allowed in a header value. Those bytes are percent-encoded; characters
//! that are legal in a URL, including existing `%XX` escapes, pass through.

use axum::http::HeaderValue;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Control characters, non-ASCII, and the ASCII characters a URL may not
/// carry literally.
const LOCATION: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encodes `url` so it can be sent as a header value.
pub fn encode_location(url: &str) -> String {
    utf8_percent_encode(url, LOCATION).to_string()
}

/// Builds the `Location` header value for `url`.
///
/// Encoding leaves only visible ASCII, so the conversion cannot fail for
/// any input.
pub fn location_header(url: &str) -> HeaderValue {
    HeaderValue::try_from(encode_location(url)).unwrap_or_else(|_| HeaderValue::from_static("/"))
}
