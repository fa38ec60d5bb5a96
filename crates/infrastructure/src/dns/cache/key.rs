use hickory_proto::rr::RecordType;

/// Cache entries are keyed by the exact query name plus the query type,
/// so `A` and `AAAA` lookups for the same name never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: String,
    pub record_type: RecordType,
}

impl CacheKey {
    pub fn new(domain: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_different_type_are_distinct_keys() {
        let a = CacheKey::new("www.example.com.", RecordType::A);
        let aaaa = CacheKey::new("www.example.com.", RecordType::AAAA);
        assert_ne!(a, aaaa);
    }
}
