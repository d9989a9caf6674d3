//! Browser-facing pages.
//!
//! Uses Askama templates for server-side rendering; assets are served from
//! the public directory by the top-level router.

pub mod handlers;
pub mod routes;
