//! Configuration module for Copper DNS
//!
//! Configuration structures organized by concern:
//! - `root`: Main configuration, loading, and CLI overrides
//! - `zone`: Locally authoritative zones and their records
//! - `cache`: Answer cache settings
//! - `server`: Listener ports and binding
//! - `health`: Upstream health check settings
//! - `forward`: Upstream forwarding settings
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod errors;
pub mod forward;
pub mod health;
pub mod logging;
pub mod root;
pub mod server;
pub mod zone;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use forward::ForwardConfig;
pub use health::HealthCheckConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use zone::{RecordConfig, ZoneConfig};
