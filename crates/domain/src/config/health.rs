use serde::{Deserialize, Serialize};

/// Health check configuration for upstream DNS servers
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthCheckConfig {
    /// Interval between probe sweeps in seconds (default: 10)
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Probe timeout in milliseconds (default: 2000)
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Consecutive failures before an endpoint is removed from the
    /// serving set (default: 3)
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,

    /// Consecutive failures past which the probe loop spends less budget
    /// on the endpoint, probing it only on every few sweeps (default: 12).
    /// Independent of `failure_threshold`: one governs serving
    /// eligibility, the other probe frequency.
    #[serde(default = "default_skip_threshold")]
    pub skip_threshold: u32,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            timeout: default_timeout(),
            failure_threshold: default_failure_threshold(),
            skip_threshold: default_skip_threshold(),
        }
    }
}

fn default_interval() -> u64 {
    10
}

fn default_timeout() -> u64 {
    2000
}

fn default_failure_threshold() -> u32 {
    3
}

fn default_skip_threshold() -> u32 {
    12
}
