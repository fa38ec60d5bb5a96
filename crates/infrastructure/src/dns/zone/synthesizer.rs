use copper_dns_domain::{RecordConfig, RecordKind, ResolveError};
use hickory_proto::rr::rdata::svcb::{Alpn, SvcParamKey, SvcParamValue, SVCB};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, HTTPS, MX};
use hickory_proto::rr::{Name, RData, Record};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Builds wire-format resource records from configured record values.
pub struct AnswerSynthesizer;

impl AnswerSynthesizer {
    /// Synthesizes one answer record owned by `query_name`.
    ///
    /// The record's configured value is parsed according to its kind; a
    /// value that does not parse is a synthesis error, not a silent skip.
    pub fn synthesize(query_name: &str, record: &RecordConfig) -> Result<Record, ResolveError> {
        let name = Name::from_str(query_name)
            .map_err(|_| ResolveError::InvalidDomainName(query_name.to_string()))?;

        let rdata = match record.kind {
            RecordKind::A => {
                let addr = Ipv4Addr::from_str(&record.value)
                    .map_err(|_| ResolveError::InvalidAddress(record.value.clone()))?;
                RData::A(A(addr))
            }
            RecordKind::Aaaa => {
                let addr = Ipv6Addr::from_str(&record.value)
                    .map_err(|_| ResolveError::InvalidAddress(record.value.clone()))?;
                RData::AAAA(AAAA(addr))
            }
            RecordKind::Cname => {
                let target = Self::fqdn(&record.value)?;
                RData::CNAME(CNAME(target))
            }
            RecordKind::Mx => {
                let exchange = Self::fqdn(&record.value)?;
                RData::MX(MX::new(record.preference, exchange))
            }
            RecordKind::Https => {
                let protocols: Vec<String> = record
                    .value
                    .split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect();
                if protocols.is_empty() {
                    return Err(ResolveError::InvalidAddress(record.value.clone()));
                }
                let svcb = SVCB::new(
                    1,
                    Name::root(),
                    vec![(SvcParamKey::Alpn, SvcParamValue::Alpn(Alpn(protocols)))],
                );
                RData::HTTPS(HTTPS(svcb))
            }
            RecordKind::Txt => {
                return Err(ResolveError::UnsupportedRecordType(
                    record.kind.as_str().to_string(),
                ))
            }
        };

        Ok(Record::from_rdata(name, record.ttl, rdata))
    }

    fn fqdn(value: &str) -> Result<Name, ResolveError> {
        let absolute = format!("{}.", value.trim_end_matches('.'));
        Name::from_str(&absolute).map_err(|_| ResolveError::InvalidDomainName(value.to_string()))
    }
}
