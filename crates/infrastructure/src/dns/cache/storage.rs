use super::key::CacheKey;
use super::metrics::CacheMetrics;
use dashmap::DashMap;
use hickory_proto::rr::Record;
use rustc_hash::FxBuildHasher;
use std::time::{Duration, Instant};
use tracing::debug;

struct CacheEntry {
    answers: Vec<Record>,
    expires_at: Instant,
}

/// Concurrent answer cache keyed by query name and type.
///
/// Reads never check expiry; expired entries are only removed by the
/// periodic [`sweep`](AnswerCache::sweep), so an answer can be served up
/// to one sweep interval past its TTL.
pub struct AnswerCache {
    entries: DashMap<CacheKey, CacheEntry, FxBuildHasher>,
    metrics: CacheMetrics,
}

impl AnswerCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            metrics: CacheMetrics::new(),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Vec<Record>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.metrics.record_hit();
                Some(entry.answers.clone())
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    /// Stores `answers` under `key` for `ttl` seconds, replacing any
    /// previous entry.
    pub fn put(&self, key: CacheKey, answers: Vec<Record>, ttl: u32) {
        let entry = CacheEntry {
            answers,
            expires_at: Instant::now() + Duration::from_secs(u64::from(ttl)),
        };
        self.entries.insert(key, entry);
        self.metrics.record_insertion();
    }

    /// Removes every entry whose deadline has passed and returns how many
    /// were evicted. Keys are collected first so no shard lock is held
    /// across removals.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|entry| entry.expires_at <= now)
            .map(|entry| entry.key().clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
        }

        if !expired.is_empty() {
            self.metrics.record_evictions(expired.len() as u64);
            debug!(evicted = expired.len(), remaining = self.entries.len(), "cache sweep");
        }
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

impl Default for AnswerCache {
    fn default() -> Self {
        Self::new()
    }
}
