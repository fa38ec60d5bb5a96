use crate::{CacheSweepJob, HealthProbeJob};
use std::sync::Arc;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Register jobs with the builder methods, then call `.start()` once.
pub struct JobRunner {
    cache_sweep: Option<CacheSweepJob>,
    health_probe: Option<HealthProbeJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            cache_sweep: None,
            health_probe: None,
        }
    }

    pub fn with_cache_sweep(mut self, job: CacheSweepJob) -> Self {
        self.cache_sweep = Some(job);
        self
    }

    pub fn with_health_probe(mut self, job: HealthProbeJob) -> Self {
        self.health_probe = Some(job);
        self
    }

    /// Start all registered background jobs.
    pub async fn start(self) {
        info!("Starting background job runner");

        if let Some(job) = self.cache_sweep {
            Arc::new(job).start().await;
        }

        if let Some(job) = self.health_probe {
            Arc::new(job).start().await;
        }

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
