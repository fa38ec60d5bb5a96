use super::udp_pool::UdpSocketPool;
use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use copper_dns_domain::ResolveError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const MAX_UDP_PAYLOAD: usize = 4096;

/// UDP exchange using pooled unconnected sockets.
pub struct UdpTransport {
    pool: Arc<UdpSocketPool>,
}

impl UdpTransport {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: UdpSocketPool::new(pool_size),
        }
    }

    async fn exchange_on(
        &self,
        payload: &[u8],
        upstream: SocketAddr,
    ) -> Result<TransportResponse, ResolveError> {
        let mut socket = self
            .pool
            .acquire(upstream)
            .await
            .map_err(ResolveError::IoError)?;

        socket
            .send_to(payload, upstream)
            .await
            .map_err(ResolveError::IoError)?;

        let mut buf = vec![0u8; MAX_UDP_PAYLOAD];
        loop {
            let (len, from) = socket
                .recv_from(&mut buf)
                .await
                .map_err(ResolveError::IoError)?;

            // Unconnected sockets can receive strays from earlier queries;
            // only the addressed upstream may answer.
            if from != upstream {
                warn!(%from, %upstream, "discarding datagram from unexpected peer");
                continue;
            }

            buf.truncate(len);
            // Exchange completed with nothing left in flight; the socket
            // is safe to hand to the next query.
            socket.mark_clean();
            return Ok(TransportResponse { bytes: buf, from });
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn exchange(
        &self,
        payload: &[u8],
        upstream: SocketAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, ResolveError> {
        tokio::time::timeout(timeout, self.exchange_on(payload, upstream))
            .await
            .map_err(|_| ResolveError::UpstreamTimeout(upstream.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::UdpSocket;

    #[tokio::test]
    async fn exchange_round_trips_a_datagram() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (len, from) = server.recv_from(&mut buf).await.unwrap();
            server.send_to(&buf[..len], from).await.unwrap();
        });

        let transport = UdpTransport::new(2);
        let response = transport
            .exchange(b"ping", server_addr, Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(response.bytes, b"ping");
        assert_eq!(response.from, server_addr);
    }

    #[tokio::test]
    async fn late_response_does_not_leak_into_next_exchange() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();

        // First request is answered far past the client timeout; the
        // second is answered immediately.
        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (_, from) = server.recv_from(&mut buf).await.unwrap();
            let late = async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                server.send_to(b"stale", from).await.unwrap();
            };
            let next = async {
                let (_, from) = server.recv_from(&mut buf).await.unwrap();
                server.send_to(b"fresh", from).await.unwrap();
            };
            tokio::join!(late, next);
        });

        let transport = UdpTransport::new(2);

        let err = transport
            .exchange(b"first", server_addr, Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::UpstreamTimeout(_)));

        // Let the stale datagram land before the next exchange starts. It
        // must not be what the second exchange reads.
        tokio::time::sleep(Duration::from_millis(250)).await;

        let response = transport
            .exchange(b"second", server_addr, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(response.bytes, b"fresh");
    }

    #[tokio::test]
    async fn silent_upstream_times_out() {
        let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let silent_addr = silent.local_addr().unwrap();

        let transport = UdpTransport::new(2);
        let err = transport
            .exchange(b"ping", silent_addr, Duration::from_millis(50))
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::UpstreamTimeout(_)));
    }
}
