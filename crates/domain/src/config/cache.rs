use serde::{Deserialize, Serialize};

/// Answer cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Accepted for config compatibility; entry lifetimes come from the
    /// answers' own TTLs, not from this value.
    #[serde(default)]
    pub ttl: i64,

    /// Seconds between eviction sweeps (default: 10)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: 0,
            sweep_interval: default_sweep_interval(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    10
}
