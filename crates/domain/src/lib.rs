//! Copper DNS Domain Layer
pub mod config;
pub mod errors;
pub mod record_kind;

pub use config::{
    CacheConfig, CliOverrides, Config, ConfigError, ForwardConfig, HealthCheckConfig,
    LoggingConfig, RecordConfig, ServerConfig, ZoneConfig,
};
pub use errors::ResolveError;
pub use record_kind::RecordKind;
