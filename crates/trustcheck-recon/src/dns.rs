//! DNS resolution via hickory.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use tracing::debug;

use crate::error::{ReconError, ReconResult};

/// Resolves hosts to addresses
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// IPv4 addresses for `host`; an unknown host is an error
    async fn resolve_ipv4(&self, host: &str) -> ReconResult<Vec<Ipv4Addr>>;
}

/// DNS resolver using the system configuration
pub struct DnsResolver {
    resolver: TokioResolver,
}

impl DnsResolver {
    /// Create a resolver from the system configuration
    pub fn new() -> ReconResult<Self> {
        let resolver = TokioResolver::builder_tokio()
            .map_err(|e| ReconError::Dns(format!("failed to create resolver: {e}")))?
            .build();
        Ok(Self { resolver })
    }
}

#[async_trait]
impl HostResolver for DnsResolver {
    async fn resolve_ipv4(&self, host: &str) -> ReconResult<Vec<Ipv4Addr>> {
        let lookup = self
            .resolver
            .ipv4_lookup(host)
            .await
            .map_err(|e| ReconError::Dns(e.to_string()))?;

        let addrs: Vec<Ipv4Addr> = lookup.iter().map(|a| a.0).collect();
        debug!(host, count = addrs.len(), "resolved A records");
        Ok(addrs)
    }
}
