//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShortUrlService;

#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<ShortUrlService>,
    /// When true, validation failures are returned with `200 OK`.
    pub legacy_status_codes: bool,
}

impl AppState {
    pub fn new(short_url_service: Arc<ShortUrlService>, legacy_status_codes: bool) -> Self {
        Self {
            short_url_service,
            legacy_status_codes,
        }
    }
}
