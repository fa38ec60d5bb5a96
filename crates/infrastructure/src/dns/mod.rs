pub mod cache;
pub mod forwarding;
pub mod record_type_map;
pub mod server;
pub mod transport;
pub mod upstream;
pub mod zone;

pub use cache::{AnswerCache, CacheMetrics};
pub use forwarding::Forwarder;
pub use record_type_map::RecordTypeMapper;
pub use server::DnsServerHandler;
pub use upstream::{HealthChecker, UpstreamEndpoint, UpstreamPool};
pub use zone::{AnswerSynthesizer, RecordStore, ZoneMatcher};
