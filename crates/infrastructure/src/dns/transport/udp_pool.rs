use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::ops::Deref;
use std::sync::{Arc, Mutex, Weak};
use tokio::net::UdpSocket;

/// Reusable unconnected UDP sockets, split by address family.
///
/// Binding a fresh socket per query costs a syscall and a port allocation;
/// the pool keeps up to `max_idle` sockets per family. A socket goes back
/// on the shelf only after a completed exchange: a checkout dropped
/// mid-exchange (timeout cancellation, I/O error) may still have a late
/// datagram queued, and handing it to the next query would feed that
/// query a stale response.
pub struct UdpSocketPool {
    idle_v4: Mutex<Vec<Arc<UdpSocket>>>,
    idle_v6: Mutex<Vec<Arc<UdpSocket>>>,
    max_idle: usize,
}

impl UdpSocketPool {
    pub fn new(max_idle: usize) -> Arc<Self> {
        Arc::new(Self {
            idle_v4: Mutex::new(Vec::new()),
            idle_v6: Mutex::new(Vec::new()),
            max_idle,
        })
    }

    /// Takes an idle socket for the family of `upstream`, binding a new
    /// ephemeral-port socket when none is available.
    pub async fn acquire(self: &Arc<Self>, upstream: SocketAddr) -> std::io::Result<PooledSocket> {
        let is_v4 = upstream.is_ipv4();
        let reused = {
            let mut idle = self.shelf(is_v4).lock().unwrap_or_else(|e| e.into_inner());
            idle.pop()
        };

        let socket = match reused {
            Some(socket) => socket,
            None => {
                let bind_addr: SocketAddr = if is_v4 {
                    (Ipv4Addr::UNSPECIFIED, 0).into()
                } else {
                    (Ipv6Addr::UNSPECIFIED, 0).into()
                };
                Arc::new(UdpSocket::bind(bind_addr).await?)
            }
        };

        Ok(PooledSocket {
            socket,
            is_v4,
            clean: false,
            pool: Arc::downgrade(self),
        })
    }

    fn shelf(&self, is_v4: bool) -> &Mutex<Vec<Arc<UdpSocket>>> {
        if is_v4 {
            &self.idle_v4
        } else {
            &self.idle_v6
        }
    }

    fn release(&self, socket: Arc<UdpSocket>, is_v4: bool) {
        let mut idle = self.shelf(is_v4).lock().unwrap_or_else(|e| e.into_inner());
        if idle.len() < self.max_idle {
            idle.push(socket);
        }
    }

    #[cfg(test)]
    fn idle_count(&self, is_v4: bool) -> usize {
        self.shelf(is_v4).lock().unwrap().len()
    }
}

/// A socket checked out of the pool.
///
/// Call [`mark_clean`](PooledSocket::mark_clean) once the exchange has
/// fully completed; only a clean socket returns to the pool on drop,
/// anything else is discarded with its pending datagrams.
pub struct PooledSocket {
    socket: Arc<UdpSocket>,
    is_v4: bool,
    clean: bool,
    pool: Weak<UdpSocketPool>,
}

impl PooledSocket {
    pub fn mark_clean(&mut self) {
        self.clean = true;
    }
}

impl Deref for PooledSocket {
    type Target = UdpSocket;

    fn deref(&self) -> &Self::Target {
        &self.socket
    }
}

impl Drop for PooledSocket {
    fn drop(&mut self) {
        if !self.clean {
            return;
        }
        if let Some(pool) = self.pool.upgrade() {
            pool.release(Arc::clone(&self.socket), self.is_v4);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clean_socket_returns_to_pool_on_drop() {
        let pool = UdpSocketPool::new(4);
        let upstream: SocketAddr = "127.0.0.1:53".parse().unwrap();

        let mut socket = pool.acquire(upstream).await.unwrap();
        assert_eq!(pool.idle_count(true), 0);
        socket.mark_clean();
        drop(socket);
        assert_eq!(pool.idle_count(true), 1);
    }

    #[tokio::test]
    async fn unmarked_socket_is_discarded() {
        let pool = UdpSocketPool::new(4);
        let upstream: SocketAddr = "127.0.0.1:53".parse().unwrap();

        // Dropping without mark_clean models a timed-out or failed
        // exchange; the socket may still have a datagram in flight.
        let socket = pool.acquire(upstream).await.unwrap();
        drop(socket);
        assert_eq!(pool.idle_count(true), 0);
    }

    #[tokio::test]
    async fn pool_caps_idle_sockets() {
        let pool = UdpSocketPool::new(1);
        let upstream: SocketAddr = "127.0.0.1:53".parse().unwrap();

        let mut a = pool.acquire(upstream).await.unwrap();
        let mut b = pool.acquire(upstream).await.unwrap();
        a.mark_clean();
        b.mark_clean();
        drop(a);
        drop(b);
        assert_eq!(pool.idle_count(true), 1);
    }

    #[tokio::test]
    async fn families_do_not_mix() {
        let pool = UdpSocketPool::new(4);
        let v4: SocketAddr = "127.0.0.1:53".parse().unwrap();

        let mut socket = pool.acquire(v4).await.unwrap();
        socket.mark_clean();
        drop(socket);
        assert_eq!(pool.idle_count(true), 1);
        assert_eq!(pool.idle_count(false), 0);
    }
}
