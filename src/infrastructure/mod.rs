//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`dns`] - Hostname resolution used by URL validation
//! - [`persistence`] - PostgreSQL repository implementation

pub mod dns;
pub mod persistence;
