//! Utility functions shared across layers.
//!
//! - [`url_validator`] - Format checking of submitted URLs
//! - [`location`] - Header-safe encoding of redirect targets

pub mod location;
pub mod url_validator;
