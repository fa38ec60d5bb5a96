use copper_dns_infrastructure::dns::AnswerCache;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Periodically evicts expired entries from the answer cache.
pub struct CacheSweepJob {
    cache: Arc<AnswerCache>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheSweepJob {
    pub fn new(cache: Arc<AnswerCache>, interval_secs: u64) -> Self {
        Self {
            cache,
            interval_secs,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting cache sweep job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            // The first tick fires immediately; an empty cache sweep is free.
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheSweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let evicted = self.cache.sweep();
                        if evicted > 0 {
                            debug!(evicted, remaining = self.cache.len(), "Cache sweep completed");
                        }
                    }
                }
            }
        });
    }
}
