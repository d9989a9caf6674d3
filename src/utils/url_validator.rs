//! Format validation for submitted URLs.
//!
//! A URL is accepted when it starts with `http://` or `https://`, contains no
//! spaces or double quotes, and parses with a host. The value itself is stored
//! unchanged; parsing only extracts the hostname for the DNS check.

use regex::Regex;
use std::sync::LazyLock;
use url::{Host, Url};

use crate::error::AppError;

/// Scheme followed by one or more characters that are neither space nor `"`.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(https|http)://[^ "]+$"#).expect("URL pattern is valid"));

/// A submitted URL that passed the format check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedUrl {
    /// The value exactly as submitted.
    pub original: String,
    /// Hostname to resolve. IPv6 literals are given without brackets.
    pub hostname: String,
}

/// Checks the format of `input` and extracts its hostname.
///
/// # Errors
///
/// Returns [`AppError::InvalidUrlFormat`] if the pattern does not match or the
/// URL has no parseable host.
///
/// # Examples
///
/// ```ignore
/// let checked = check_url_format("https://www.freecodecamp.org").unwrap();
/// assert_eq!(checked.hostname, "www.freecodecamp.org");
///
/// assert!(check_url_format("ftp://example.com").is_err());
/// ```
pub fn check_url_format(input: &str) -> Result<CheckedUrl, AppError> {
    if !URL_PATTERN.is_match(input) {
        return Err(AppError::InvalidUrlFormat);
    }

    let parsed = Url::parse(input).map_err(|_| AppError::InvalidUrlFormat)?;

    let hostname = match parsed.host() {
        Some(Host::Domain(domain)) if !domain.is_empty() => domain.to_string(),
        Some(Host::Ipv4(addr)) => addr.to_string(),
        Some(Host::Ipv6(addr)) => addr.to_string(),
        _ => return Err(AppError::InvalidUrlFormat),
    };

    Ok(CheckedUrl {
        original: input.to_string(),
        hostname,
    })
}
