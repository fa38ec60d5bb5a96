use serde::{Deserialize, Serialize};

/// Upstream forwarding configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForwardConfig {
    /// Per-attempt exchange timeout in milliseconds (default: 5000)
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Maximum idle outbound UDP sockets kept per address family
    /// (default: 8)
    #[serde(default = "default_socket_pool_size")]
    pub socket_pool_size: usize,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            query_timeout: default_query_timeout(),
            socket_pool_size: default_socket_pool_size(),
        }
    }
}

fn default_query_timeout() -> u64 {
    5000
}

fn default_socket_pool_size() -> usize {
    8
}
