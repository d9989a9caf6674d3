//! Application layer services implementing business logic.
//!
//! Services coordinate validation, identifier allocation and repository calls,
//! and give HTTP handlers and the admin CLI a single entry point.
//!
//! # Available Services
//!
//! - [`services::short_url_service::ShortUrlService`] - Creation and resolution of short URLs

pub mod services;
