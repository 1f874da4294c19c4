//! In-Process Cache Module
//!
//! `CacheService` backed by a HashMap with TTL expiration and a hard capacity.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockWriteGuard};

use tracing::debug;

use crate::cache::{CacheEntry, CacheService, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{Result, StoreError};

// == Memory Cache ==
/// In-process cache service.
///
/// When full, new keys are refused with `CacheUnavailable` after expired
/// entries have been purged; the gateway treats that as a dropped write.
#[derive(Debug)]
pub struct MemoryCache {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates a new MemoryCache holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
        }
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, CacheEntry>>> {
        self.entries
            .write()
            .map_err(|_| StoreError::CacheUnavailable("cache lock poisoned".to_string()))
    }

    /// Returns the live entry for `key` without touching expiry state.
    pub fn peek(&self, key: &str) -> Option<CacheEntry> {
        let entries = self.entries.read().ok()?;
        entries.get(key).filter(|e| !e.is_expired()).cloned()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        match self.write() {
            Ok(mut entries) => purge_expired(&mut entries),
            Err(_) => 0,
        }
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn purge_expired(entries: &mut HashMap<String, CacheEntry>) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired());
    before - entries.len()
}

impl CacheService for MemoryCache {
    // == Get ==
    /// Returns the value if present and not expired. Expired entries are removed.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut entries = self.write()?;
        match entries.get(key) {
            None => return Ok(None),
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => {}
        }

        entries.remove(key);
        debug!(key, "dropped expired cache entry");
        Ok(None)
    }

    // == Set ==
    /// Stores a value, overwriting any prior entry and resetting its TTL.
    fn set(&self, key: &str, value: Vec<u8>, ttl_secs: u64) -> Result<()> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(StoreError::InvalidRequest(format!(
                "Key must be 1 to {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(StoreError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let mut entries = self.write()?;
        if !entries.contains_key(key) && entries.len() >= self.max_entries {
            purge_expired(&mut entries);
            if entries.len() >= self.max_entries {
                return Err(StoreError::CacheUnavailable("cache full".to_string()));
            }
        }

        entries.insert(key.to_string(), CacheEntry::new(value, ttl_secs));
        Ok(())
    }

    // == Delete ==
    fn delete(&self, key: &str) -> Result<()> {
        self.write()?.remove(key);
        Ok(())
    }
}
