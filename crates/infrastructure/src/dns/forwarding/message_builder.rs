use copper_dns_domain::ResolveError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use std::str::FromStr;

/// Builds wire-format query messages for upstream exchanges.
pub struct MessageBuilder;

impl MessageBuilder {
    /// Encodes a recursive query for `domain`/`record_type` under a fresh
    /// random transaction ID. Returns the payload and the ID so the caller
    /// can match the response.
    pub fn build_query(domain: &str, record_type: RecordType) -> Result<(Vec<u8>, u16), ResolveError> {
        let name = Name::from_str(domain)
            .map_err(|_| ResolveError::InvalidDomainName(domain.to_string()))?;
        Self::encode(name, record_type)
    }

    /// Encodes the liveness probe: an NS query for the root zone. Any
    /// functioning resolver can answer it from cache.
    pub fn build_probe() -> Result<(Vec<u8>, u16), ResolveError> {
        Self::encode(Name::root(), RecordType::NS)
    }

    fn encode(name: Name, record_type: RecordType) -> Result<(Vec<u8>, u16), ResolveError> {
        let id = fastrand::u16(..);

        let mut query = Query::new();
        query
            .set_name(name)
            .set_query_type(record_type)
            .set_query_class(DNSClass::IN);

        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true)
            .add_query(query);

        let bytes = message
            .to_vec()
            .map_err(|e| ResolveError::InvalidDnsResponse(e.to_string()))?;
        Ok((bytes, id))
    }
}
