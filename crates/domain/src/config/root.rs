use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::forward::ForwardConfig;
use super::health::HealthCheckConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::zone::ZoneConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;

/// Main configuration, loaded once at startup and immutable afterwards.
///
/// `servers`, `domains` and `cache` form the original JSON schema; the
/// remaining sections are optional and default so existing config files
/// keep loading unchanged.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Upstream resolver addresses, "host:port"
    #[serde(default)]
    pub servers: Vec<String>,

    /// Locally authoritative zones, in match-priority order
    #[serde(default)]
    pub domains: Vec<ZoneConfig>,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub health: HealthCheckConfig,

    #[serde(default)]
    pub forward: ForwardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Command-line flags folded into the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            domains: Vec::new(),
            cache: CacheConfig::default(),
            server: ServerConfig::default(),
            health: HealthCheckConfig::default(),
            forward: ForwardConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => {
                let body = fs::read_to_string(p).map_err(|e| ConfigError::Read {
                    path: p.to_string(),
                    source: e,
                })?;
                serde_json::from_str(&body)?
            }
            None => Config::default(),
        };

        if let Some(port) = overrides.dns_port {
            config.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            config.server.bind_address = bind;
        }

        Ok(config)
    }

    /// Checks that every upstream address parses as a socket address.
    ///
    /// Record values are deliberately not validated here: a malformed
    /// record answers its question with an empty record set at query time
    /// instead of failing the whole startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for server in &self.servers {
            server
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidUpstream(server.clone()))?;
        }
        Ok(())
    }
}
