use crate::record_kind::RecordKind;
use serde::{Deserialize, Serialize};

/// A locally authoritative zone: a suffix label plus its records.
///
/// Zone order matters: the first zone whose name the query contains is
/// the first candidate, and within a zone the first matching record wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    /// Suffix label, e.g. "example.com"
    pub name: String,

    #[serde(default)]
    pub records: Vec<RecordConfig>,
}

/// A single configured record inside a zone.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordConfig {
    /// Host label, e.g. "www". May contain a single `*` wildcard token
    /// matching any prefix that shares the suffix after the token.
    pub name: String,

    #[serde(rename = "type")]
    pub kind: RecordKind,

    /// Record payload: an IP address for A/AAAA, a target name for
    /// CNAME/MX, a comma-separated ALPN list for HTTPS.
    pub value: String,

    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// MX preference; ignored by the other record kinds.
    #[serde(default)]
    pub preference: u16,
}

fn default_ttl() -> u32 {
    300
}
