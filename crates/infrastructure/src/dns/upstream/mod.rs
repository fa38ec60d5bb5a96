// Upstream resolver pool with liveness tracking.

pub mod endpoint;
pub mod health;
pub mod pool;

pub use endpoint::{EndpointState, UpstreamEndpoint};
pub use health::HealthChecker;
pub use pool::UpstreamPool;
