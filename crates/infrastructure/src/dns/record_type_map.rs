use copper_dns_domain::RecordKind;
use hickory_proto::rr::RecordType;

/// Maps wire record types from `hickory-proto` to the configuration-side
/// record vocabulary.
pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Returns `None` for query types outside the locally supported set;
    /// those queries bypass zone matching entirely.
    pub fn from_wire(record_type: RecordType) -> Option<RecordKind> {
        match record_type {
            RecordType::A => Some(RecordKind::A),
            RecordType::AAAA => Some(RecordKind::Aaaa),
            RecordType::TXT => Some(RecordKind::Txt),
            RecordType::CNAME => Some(RecordKind::Cname),
            RecordType::MX => Some(RecordKind::Mx),
            RecordType::HTTPS => Some(RecordKind::Https),
            _ => None,
        }
    }
}
