use super::message_builder::MessageBuilder;
use super::response_parser::ResponseParser;
use crate::dns::cache::{AnswerCache, CacheKey};
use crate::dns::transport::DnsTransport;
use crate::dns::upstream::UpstreamPool;
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::{Record, RecordType};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Resolves non-local queries through the upstream pool, consulting the
/// answer cache first and failing over across eligible upstreams.
pub struct Forwarder {
    cache: Arc<AnswerCache>,
    pool: Arc<UpstreamPool>,
    transport: Arc<dyn DnsTransport>,
    query_timeout: Duration,
}

impl Forwarder {
    pub fn new(
        cache: Arc<AnswerCache>,
        pool: Arc<UpstreamPool>,
        transport: Arc<dyn DnsTransport>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            pool,
            transport,
            query_timeout,
        }
    }

    /// Returns the answers for `query_name`/`record_type`, or an empty set
    /// when no upstream produced any.
    ///
    /// Upstreams are tried in configuration order. An attempt counts as
    /// failed on transport error, on a transaction ID mismatch, on an
    /// error response code, and on an otherwise valid response with an
    /// empty answer section. The first
    /// response carrying answers is cached under its leading record's TTL
    /// and marks the endpoint alive; query-path failures never feed the
    /// health checker's demotion counter.
    pub async fn forward(&self, query_name: &str, record_type: RecordType) -> Vec<Record> {
        let key = CacheKey::new(query_name, record_type);
        if let Some(answers) = self.cache.get(&key) {
            debug!(%query_name, ?record_type, "answering from cache");
            return answers;
        }

        for endpoint in self.pool.select_eligible() {
            let (payload, id) = match MessageBuilder::build_query(query_name, record_type) {
                Ok(built) => built,
                Err(e) => {
                    warn!(%query_name, error = %e, "failed to encode upstream query");
                    return Vec::new();
                }
            };

            let response = match self
                .transport
                .exchange(&payload, endpoint.addr(), self.query_timeout)
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    debug!(upstream = %endpoint.addr(), error = %e, "upstream exchange failed");
                    continue;
                }
            };

            let parsed = match ResponseParser::parse(&response.bytes) {
                Ok(parsed) => parsed,
                Err(e) => {
                    debug!(upstream = %endpoint.addr(), error = %e, "unparseable upstream response");
                    continue;
                }
            };

            if parsed.id != id {
                warn!(
                    upstream = %endpoint.addr(),
                    expected = id,
                    got = parsed.id,
                    "transaction id mismatch, discarding response"
                );
                continue;
            }

            if parsed.response_code != ResponseCode::NoError {
                debug!(
                    upstream = %endpoint.addr(),
                    code = ?parsed.response_code,
                    "upstream returned an error code, trying next upstream"
                );
                continue;
            }

            if !parsed.has_answers() {
                debug!(upstream = %endpoint.addr(), %query_name, "empty answer section, trying next upstream");
                continue;
            }

            let ttl = parsed.answers[0].ttl();
            self.cache.put(key, parsed.answers.clone(), ttl);
            endpoint.record_success();
            return parsed.answers;
        }

        warn!(%query_name, ?record_type, "no upstream produced an answer");
        Vec::new()
    }
}
