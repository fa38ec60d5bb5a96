// Datagram exchange with upstream resolvers.

pub mod udp;
pub mod udp_pool;

pub use udp::UdpTransport;
pub use udp_pool::UdpSocketPool;

use async_trait::async_trait;
use copper_dns_domain::ResolveError;
use std::net::SocketAddr;
use std::time::Duration;

/// A raw response datagram from an upstream resolver.
#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
    pub from: SocketAddr,
}

/// One request/response exchange with a single upstream.
///
/// Implementations own retransmission-free semantics: one send, one
/// receive, bounded by `timeout`. Failover across upstreams lives above
/// this trait.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn exchange(
        &self,
        payload: &[u8],
        upstream: SocketAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, ResolveError>;
}
