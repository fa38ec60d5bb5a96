use copper_dns_domain::ResolveError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::Record;

/// A decoded upstream response, reduced to what forwarding needs.
#[derive(Debug)]
pub struct ForwardResponse {
    pub id: u16,
    pub response_code: ResponseCode,
    pub answers: Vec<Record>,
}

impl ForwardResponse {
    pub fn has_answers(&self) -> bool {
        !self.answers.is_empty()
    }
}

/// Decodes raw upstream datagrams into [`ForwardResponse`]s.
pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(bytes: &[u8]) -> Result<ForwardResponse, ResolveError> {
        let message = Message::from_vec(bytes)
            .map_err(|e| ResolveError::InvalidDnsResponse(e.to_string()))?;

        Ok(ForwardResponse {
            id: message.id(),
            response_code: message.response_code(),
            answers: message.answers().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::{Message, MessageType};
    use hickory_proto::rr::rdata::A;
    use hickory_proto::rr::{Name, RData};
    use hickory_proto::serialize::binary::BinEncodable;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn encode_response(id: u16, answers: Vec<Record>) -> Vec<u8> {
        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Response)
            .add_answers(answers);
        message.to_vec().unwrap()
    }

    #[test]
    fn parses_id_and_answers() {
        let record = Record::from_rdata(
            Name::from_str("www.example.com.").unwrap(),
            60,
            RData::A(A(Ipv4Addr::new(93, 184, 216, 34))),
        );
        let bytes = encode_response(0x1234, vec![record]);

        let response = ResponseParser::parse(&bytes).unwrap();
        assert_eq!(response.id, 0x1234);
        assert_eq!(response.response_code, ResponseCode::NoError);
        assert!(response.has_answers());
        assert_eq!(response.answers[0].ttl(), 60);
    }

    #[test]
    fn empty_answer_section_is_reported() {
        let bytes = encode_response(7, vec![]);
        let response = ResponseParser::parse(&bytes).unwrap();
        assert!(!response.has_answers());
    }

    #[test]
    fn truncated_datagram_is_an_error() {
        assert!(ResponseParser::parse(&[0x12, 0x34, 0x01]).is_err());
    }
}
