use super::endpoint::UpstreamEndpoint;
use super::pool::UpstreamPool;
use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use crate::dns::transport::DnsTransport;
use copper_dns_domain::HealthCheckConfig;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

// A persistently failing endpoint is only probed on every Nth round so a
// long outage does not keep burning probe timeouts.
const PROBE_BACKOFF_ROUNDS: u64 = 4;

/// Periodically probes every upstream and maintains endpoint liveness.
///
/// The probe is a root NS query; any response with a non-empty answer
/// section counts as alive. Only probe outcomes move an endpoint to
/// `Dead`, the query path can only promote.
pub struct HealthChecker {
    pool: Arc<UpstreamPool>,
    transport: Arc<dyn DnsTransport>,
    probe_timeout: Duration,
    failure_threshold: u32,
    skip_threshold: u32,
    rounds: AtomicU64,
}

impl HealthChecker {
    pub fn new(
        pool: Arc<UpstreamPool>,
        transport: Arc<dyn DnsTransport>,
        config: &HealthCheckConfig,
    ) -> Self {
        Self {
            pool,
            transport,
            probe_timeout: Duration::from_millis(config.timeout),
            failure_threshold: config.failure_threshold,
            skip_threshold: config.skip_threshold,
            rounds: AtomicU64::new(0),
        }
    }

    /// Runs one probe round over the whole pool.
    pub async fn probe_all(&self) {
        let round = self.rounds.fetch_add(1, Ordering::AcqRel) + 1;

        for endpoint in self.pool.endpoints() {
            if self.should_skip(endpoint, round) {
                debug!(upstream = %endpoint.addr(), "skipping probe for persistently failing upstream");
                continue;
            }
            self.probe(endpoint).await;
        }
    }

    fn should_skip(&self, endpoint: &UpstreamEndpoint, round: u64) -> bool {
        endpoint.probe_failures() >= self.skip_threshold && round % PROBE_BACKOFF_ROUNDS != 0
    }

    async fn probe(&self, endpoint: &Arc<UpstreamEndpoint>) {
        let was_eligible = endpoint.is_eligible();

        if self.probe_once(endpoint).await {
            if !was_eligible {
                info!(upstream = %endpoint.addr(), "upstream recovered");
            }
            endpoint.record_success();
        } else {
            let failures = endpoint.record_probe_failure(self.failure_threshold);
            if was_eligible && !endpoint.is_eligible() {
                warn!(
                    upstream = %endpoint.addr(),
                    consecutive_failures = failures,
                    "upstream marked dead"
                );
            }
        }
    }

    async fn probe_once(&self, endpoint: &Arc<UpstreamEndpoint>) -> bool {
        let (payload, id) = match MessageBuilder::build_probe() {
            Ok(built) => built,
            Err(e) => {
                warn!(error = %e, "failed to encode health probe");
                return false;
            }
        };

        let response = match self
            .transport
            .exchange(&payload, endpoint.addr(), self.probe_timeout)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!(upstream = %endpoint.addr(), error = %e, "health probe exchange failed");
                return false;
            }
        };

        match ResponseParser::parse(&response.bytes) {
            Ok(parsed) => parsed.id == id && parsed.has_answers(),
            Err(e) => {
                debug!(upstream = %endpoint.addr(), error = %e, "unparseable health probe response");
                false
            }
        }
    }
}
