// Local zone matching: maps a query name/type to a configured record.

pub mod synthesizer;

pub use synthesizer::AnswerSynthesizer;

use super::record_type_map::RecordTypeMapper;
use copper_dns_domain::{RecordConfig, RecordKind, ZoneConfig};
use std::sync::Arc;
use tracing::debug;

/// In-memory, read-only view of the configured zones.
///
/// Built once from the loaded configuration; zone and record order is
/// preserved because matching is order-dependent.
pub struct RecordStore {
    zones: Vec<ZoneConfig>,
}

impl RecordStore {
    pub fn new(zones: Vec<ZoneConfig>) -> Self {
        Self { zones }
    }

    pub fn zones(&self) -> &[ZoneConfig] {
        &self.zones
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// Finds the best matching configured record for a query.
pub struct ZoneMatcher {
    store: Arc<RecordStore>,
}

impl ZoneMatcher {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Returns the first record that answers `query_name`/`query_type`.
    ///
    /// A zone is a candidate when the query name contains the zone name as
    /// a substring. Within a candidate zone, records are scanned in order:
    /// a record whose FQDN equals the query name, or whose wildcard suffix
    /// the query name contains, is a name match. A name match of the
    /// requested type wins immediately; a CNAME name match answers for any
    /// requested type when no earlier record matched exactly.
    pub fn find(&self, query_name: &str, query_type: hickory_proto::rr::RecordType) -> Option<&RecordConfig> {
        for zone in self.store.zones() {
            if !query_name.contains(zone.name.as_str()) {
                continue;
            }

            let Some(wanted) = RecordTypeMapper::from_wire(query_type) else {
                debug!(%query_name, ?query_type, "query type outside local zone support");
                continue;
            };

            for record in &zone.records {
                if !Self::name_matches(query_name, record, &zone.name) {
                    continue;
                }
                if record.kind == wanted {
                    return Some(record);
                }
                // Alias records answer for any requested type when no
                // earlier record produced an exact-type match.
                if record.kind == RecordKind::Cname {
                    return Some(record);
                }
            }
        }
        None
    }

    fn name_matches(query_name: &str, record: &RecordConfig, zone_name: &str) -> bool {
        let fqdn = format!("{}.{}.", record.name, zone_name);
        if fqdn == query_name {
            return true;
        }
        if !record.name.contains('*') {
            return false;
        }
        let after_token = record.name.split('*').nth(1).unwrap_or("");
        let suffix = format!("{}.{}.", after_token, zone_name);
        query_name.contains(&suffix)
    }
}
