//! Resolver trait and error types.

use async_trait::async_trait;
use std::time::Duration;

/// Reasons a hostname is considered unresolvable.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("DNS lookup failed: {0}")]
    Lookup(String),

    #[error("DNS lookup returned no addresses")]
    NoAddresses,

    #[error("DNS lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// Checks that a hostname resolves to at least one address.
///
/// # Implementations
///
/// - [`crate::infrastructure::dns::SystemResolver`] - system resolver with a timeout
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolves `host`, which is a domain name or a bare IP literal.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] when the lookup fails, is empty, or times out.
    async fn resolve(&self, host: &str) -> Result<(), ResolveError>;
}
