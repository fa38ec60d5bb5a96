use crate::dns::forwarding::Forwarder;
use crate::dns::zone::{AnswerSynthesizer, ZoneMatcher};
use async_trait::async_trait;
use hickory_proto::op::{Header, ResponseCode};
use hickory_proto::rr::{Record, RecordType};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Top-level resolution pipeline: local zones first, then the forwarder.
///
/// Every question in a request is resolved independently and in order;
/// a question that resolves to nothing simply contributes no answers.
pub struct DnsServerHandler {
    matcher: ZoneMatcher,
    forwarder: Arc<Forwarder>,
}

impl DnsServerHandler {
    pub fn new(matcher: ZoneMatcher, forwarder: Arc<Forwarder>) -> Self {
        Self { matcher, forwarder }
    }

    /// Resolves one question. Locally matched records are synthesized and
    /// never cached; a synthesis failure yields an empty answer without
    /// falling through to the forwarder.
    pub async fn answers_for(&self, query_name: &str, query_type: RecordType) -> Vec<Record> {
        if let Some(record) = self.matcher.find(query_name, query_type) {
            debug!(%query_name, ?query_type, "answering from local zone");
            return match AnswerSynthesizer::synthesize(query_name, record) {
                Ok(answer) => vec![answer],
                Err(e) => {
                    warn!(%query_name, error = %e, "failed to synthesize local answer");
                    Vec::new()
                }
            };
        }

        self.forwarder.forward(query_name, query_type).await
    }

    fn servfail() -> ResponseInfo {
        let mut header = Header::new();
        header.set_response_code(ResponseCode::ServFail);
        header.into()
    }
}

#[async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let mut answers: Vec<Record> = Vec::new();
        for query in std::iter::once(request.query()) {
            let query_name = query.name().to_string();
            let query_type = query.query_type();
            debug!(%query_name, ?query_type, client = %request.src(), "received query");
            answers.extend(self.answers_for(&query_name, query_type).await);
        }

        let mut header = Header::response_from_request(request.header());
        header.set_authoritative(true);
        header.set_recursion_available(true);

        let builder = MessageResponseBuilder::from_message_request(request);
        let response = builder.build(
            header,
            answers.iter(),
            std::iter::empty(),
            std::iter::empty(),
            std::iter::empty(),
        );

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "failed to send response");
                Self::servfail()
            }
        }
    }
}
