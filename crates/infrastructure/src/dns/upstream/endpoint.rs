use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};

/// Liveness of one upstream as last observed.
///
/// Endpoints start `Unknown` and stay eligible for query traffic until a
/// health probe demotes them to `Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointState {
    Unknown,
    Alive,
    Dead,
}

impl EndpointState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Alive,
            2 => Self::Dead,
            _ => Self::Unknown,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Alive => 1,
            Self::Dead => 2,
        }
    }
}

/// One configured upstream resolver with its observed liveness.
///
/// Probe failures accumulate in a separate counter from query-path
/// failures: only the health checker demotes an endpoint, so a burst of
/// query timeouts cannot mark an upstream dead on its own.
#[derive(Debug)]
pub struct UpstreamEndpoint {
    addr: SocketAddr,
    state: AtomicU8,
    probe_failures: AtomicU32,
}

impl UpstreamEndpoint {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            state: AtomicU8::new(EndpointState::Unknown.as_u8()),
            probe_failures: AtomicU32::new(0),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn state(&self) -> EndpointState {
        EndpointState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_eligible(&self) -> bool {
        self.state() != EndpointState::Dead
    }

    /// Marks the endpoint alive after a successful exchange, on either the
    /// query path or the probe path, and clears accumulated probe failures.
    pub fn record_success(&self) {
        self.state.store(EndpointState::Alive.as_u8(), Ordering::Release);
        self.probe_failures.store(0, Ordering::Release);
    }

    /// Records one failed health probe and returns the new consecutive
    /// failure count. The endpoint is demoted once the count reaches
    /// `failure_threshold`.
    pub fn record_probe_failure(&self, failure_threshold: u32) -> u32 {
        let failures = self.probe_failures.fetch_add(1, Ordering::AcqRel) + 1;
        if failures >= failure_threshold {
            self.state.store(EndpointState::Dead.as_u8(), Ordering::Release);
        }
        failures
    }

    pub fn probe_failures(&self) -> u32 {
        self.probe_failures.load(Ordering::Acquire)
    }
}
