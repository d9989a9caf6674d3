//! Hostname resolution for URL validation.
//!
//! Provides a [`HostResolver`] trait with the production [`SystemResolver`].
//! Tests substitute their own implementation so they never touch the network.

mod service;
mod system_resolver;

pub use service::{HostResolver, ResolveError};
pub use system_resolver::SystemResolver;

#[cfg(test)]
pub use service::MockHostResolver;
