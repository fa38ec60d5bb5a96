//! Copper DNS Background Jobs

mod cache_sweep;
mod health_probe;
mod runner;

pub use cache_sweep::CacheSweepJob;
pub use health_probe::HealthProbeJob;
pub use runner::JobRunner;
