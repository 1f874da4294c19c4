//! Cache Gateway Module
//!
//! Best-effort acceleration layer in front of a `CacheService`. The gateway is
//! never the source of truth: every service failure is logged and absorbed.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheCounters, CacheService, CacheStats, DEFAULT_CACHE_TTL_SECS};
use crate::runtime::CacheFlag;

// == Cache Gateway ==
/// Gated, counted access to the cache service.
///
/// While the flag is off every operation is inert: nothing reaches the
/// service and no counter moves.
pub struct CacheGateway {
    service: Arc<dyn CacheService>,
    flag: Arc<CacheFlag>,
    counters: Arc<CacheCounters>,
    ttl_secs: u64,
}

impl CacheGateway {
    pub fn new(
        service: Arc<dyn CacheService>,
        flag: Arc<CacheFlag>,
        counters: Arc<CacheCounters>,
    ) -> Self {
        Self {
            service,
            flag,
            counters,
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }

    /// Overrides the TTL applied to every write.
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.flag.value()
    }

    pub fn flag(&self) -> &CacheFlag {
        &self.flag
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }

    // == Get ==
    /// Looks up `key`, counting a hit or a miss. A failed lookup is a miss.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        if !self.is_enabled() {
            return None;
        }

        let value = match self.service.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "cache get failed, treating as miss");
                None
            }
        };

        if value.is_some() {
            self.counters.record_hit();
            debug!(key, "cache hit");
        } else {
            self.counters.record_miss();
            debug!(key, "cache miss");
        }
        value
    }

    // == Set ==
    /// Stores `value` under `key` with the gateway TTL, replacing any prior entry.
    ///
    /// Returns whether the service accepted the write. A refused write may
    /// leave an older entry for `key` in place.
    pub fn set(&self, key: &str, value: Vec<u8>) -> bool {
        if !self.is_enabled() {
            return false;
        }

        self.counters.record_put();
        match self.service.set(key, value, self.ttl_secs) {
            Ok(()) => true,
            Err(err) => {
                warn!(key, error = %err, "cache set failed, write dropped");
                false
            }
        }
    }

    // == Delete ==
    pub fn delete(&self, key: &str) {
        if !self.is_enabled() {
            return;
        }

        self.counters.record_delete();
        if let Err(err) = self.service.delete(key) {
            warn!(key, error = %err, "cache delete failed, entry may linger until TTL");
        }
    }
}

impl std::fmt::Debug for CacheGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheGateway")
            .field("flag", &self.flag)
            .field("ttl_secs", &self.ttl_secs)
            .field("stats", &self.stats())
            .finish()
    }
}
