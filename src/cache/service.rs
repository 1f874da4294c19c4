//! Cache Service Contract
//!
//! The key-value cache the gateway talks to. Entries are not durable and may
//! vanish before their TTL runs out.

use crate::error::Result;

/// External cache service.
///
/// Failures are reported as `StoreError::CacheUnavailable`; callers decide
/// whether to absorb them.
pub trait CacheService: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any prior entry.
    fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<()>;

    /// Removes `key`. Removing an absent key succeeds.
    fn delete(&self, key: &str) -> Result<()>;
}
