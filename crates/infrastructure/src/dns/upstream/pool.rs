use super::endpoint::UpstreamEndpoint;
use copper_dns_domain::ConfigError;
use smallvec::SmallVec;
use std::sync::Arc;

/// Fixed set of upstream resolvers in configured priority order.
pub struct UpstreamPool {
    endpoints: Vec<Arc<UpstreamEndpoint>>,
}

impl UpstreamPool {
    pub fn new(endpoints: Vec<Arc<UpstreamEndpoint>>) -> Self {
        Self { endpoints }
    }

    /// Builds the pool from configured `host:port` strings.
    pub fn from_servers(servers: &[String]) -> Result<Self, ConfigError> {
        let endpoints = servers
            .iter()
            .map(|server| {
                server
                    .parse()
                    .map(|addr| Arc::new(UpstreamEndpoint::new(addr)))
                    .map_err(|_| ConfigError::InvalidUpstream(server.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(endpoints))
    }

    pub fn endpoints(&self) -> &[Arc<UpstreamEndpoint>] {
        &self.endpoints
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Returns the endpoints currently eligible for queries, preserving
    /// configuration order so failover always tries the preferred
    /// upstream first. `Unknown` endpoints are included; only endpoints a
    /// health probe has demoted are filtered out.
    pub fn select_eligible(&self) -> SmallVec<[Arc<UpstreamEndpoint>; 4]> {
        self.endpoints
            .iter()
            .filter(|ep| ep.is_eligible())
            .cloned()
            .collect()
    }
}
