/// Request-scoped cache for Graph API responses
use crate::constants::{REQUEST_CACHE_MAX_ENTRIES, REQUEST_CACHE_TTL_SECONDS};
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct CacheEntry {
    value: Value,
    inserted_at: Instant,
}

/// Bounded URL -> response cache.
///
/// Owned by a single Graph client for the duration of one request; entries
/// expire after `ttl` and the oldest entry is evicted once `max_entries` is
/// reached.
pub struct RequestCache {
    entries: HashMap<String, CacheEntry>,
    max_entries: usize,
    ttl: Duration,
}

impl Default for RequestCache {
    fn default() -> Self {
        Self::new(
            REQUEST_CACHE_MAX_ENTRIES,
            Duration::from_secs(REQUEST_CACHE_TTL_SECONDS),
        )
    }
}

impl RequestCache {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            ttl,
        }
    }

    /// A cache that never stores anything
    pub fn disabled() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn get(&mut self, url: &str) -> Option<Value> {
        let expired = self
            .entries
            .get(url)
            .map(|entry| entry.inserted_at.elapsed() >= self.ttl)?;

        if expired {
            self.entries.remove(url);
            None
        } else {
            self.entries.get(url).map(|entry| entry.value.clone())
        }
    }

    pub fn insert(&mut self, url: &str, value: Value) {
        if self.max_entries == 0 {
            return;
        }

        if !self.entries.contains_key(url) && self.entries.len() >= self.max_entries {
            self.evict_oldest();
        }

        self.entries.insert(
            url.to_string(),
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.inserted_at)
            .map(|(url, _)| url.clone());

        if let Some(url) = oldest {
            self.entries.remove(&url);
        }
    }
}
