//! Cache Counters Module
//!
//! Monotonic counters describing real cache traffic: puts, hits, misses and deletes.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Name and help text of an exported counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterInfo {
    pub name: &'static str,
    pub description: &'static str,
}

pub const CACHE_PUT: CounterInfo = CounterInfo {
    name: "models-cache-put",
    description: "A number of times an object was put into the cache.",
};
pub const CACHE_HIT: CounterInfo = CounterInfo {
    name: "models-cache-hit",
    description: "A number of times an object was found in the cache.",
};
pub const CACHE_MISS: CounterInfo = CounterInfo {
    name: "models-cache-miss",
    description: "A number of times an object was not found in the cache.",
};
pub const CACHE_DELETE: CounterInfo = CounterInfo {
    name: "models-cache-delete",
    description: "A number of times an object was deleted from the cache.",
};

// == Cache Counters ==
/// Registry of the four cache counters.
///
/// Increment-only and safe to share across threads; constructed explicitly and
/// handed to the gateway.
#[derive(Debug, Default)]
pub struct CacheCounters {
    puts: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    deletes: AtomicU64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_put(&self) {
        self.puts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            puts: self.puts.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
        }
    }
}

// == Cache Stats ==
/// Plain copy of the counters at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub puts: u64,
    pub hits: u64,
    pub misses: u64,
    pub deletes: u64,
}

impl CacheStats {
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Counters paired with their exported name and description.
    pub fn named(&self) -> [(CounterInfo, u64); 4] {
        [
            (CACHE_PUT, self.puts),
            (CACHE_HIT, self.hits),
            (CACHE_MISS, self.misses),
            (CACHE_DELETE, self.deletes),
        ]
    }
}
