//! Core domain entities.
//!
//! - [`ShortUrl`] - A stored mapping from identifier to original URL
//! - [`NewShortUrl`] - Input for inserting a mapping

pub mod short_url;

pub use short_url::{NewShortUrl, ShortUrl, parse_short_url_id};
