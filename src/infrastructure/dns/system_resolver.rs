//! Resolver backed by the operating system.

use super::service::{HostResolver, ResolveError};
use async_trait::async_trait;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::lookup_host;
use tracing::debug;

/// Resolves hostnames with [`tokio::net::lookup_host`].
///
/// The lookup runs on tokio's blocking pool and is awaited, so a slow DNS
/// server only holds up the request that triggered it. Lookups that exceed
/// `timeout` fail with [`ResolveError::Timeout`].
#[derive(Debug, Clone)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<(), ResolveError> {
        let addr = bounded_lookup(self.timeout, lookup_host((host, 0))).await?;
        debug!(host, %addr, "Hostname resolved");
        Ok(())
    }
}

/// Awaits `lookup` for at most `timeout` and returns the first address.
async fn bounded_lookup<F, I>(timeout: Duration, lookup: F) -> Result<SocketAddr, ResolveError>
where
    F: Future<Output = io::Result<I>>,
    I: Iterator<Item = SocketAddr>,
{
    let mut addrs = tokio::time::timeout(timeout, lookup)
        .await
        .map_err(|_| ResolveError::Timeout(timeout))?
        .map_err(|e| ResolveError::Lookup(e.to_string()))?;

    addrs.next().ok_or(ResolveError::NoAddresses)
}
