use copper_dns_infrastructure::dns::HealthChecker;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Periodically probes every upstream resolver for liveness.
pub struct HealthProbeJob {
    checker: Arc<HealthChecker>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl HealthProbeJob {
    pub fn new(checker: Arc<HealthChecker>, interval_secs: u64) -> Self {
        Self {
            checker,
            interval_secs,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting upstream health probe job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("HealthProbeJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.checker.probe_all().await;
                    }
                }
            }
        });
    }
}
