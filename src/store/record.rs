//! Record Store Module
//!
//! Durable CRUD for keyed records with write-through and read-through caching.
//!
//! Durable writes always happen before the matching cache write or
//! invalidation, so a crash between the two leaves the cache stale or empty,
//! never ahead of durable state.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::CacheGateway;
use crate::error::{Result, StoreError};
use crate::store::{DurableStore, StoredHandle};

// == Record ==
/// An entity persisted under a unique, caller-assigned key.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Unique key, also used as the cache key.
    fn key(&self) -> &str;

    /// Status flag checked by `RecordStore::get_cached_active_by_key`.
    fn is_active(&self) -> bool;
}

// == Record Store ==
/// Cache-accelerated facade over a `DurableStore`.
pub struct RecordStore<R, D> {
    durable: D,
    gateway: Arc<CacheGateway>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record, D: DurableStore<R>> RecordStore<R, D> {
    pub fn new(durable: D, gateway: Arc<CacheGateway>) -> Self {
        Self {
            durable,
            gateway,
            _record: PhantomData,
        }
    }

    pub fn gateway(&self) -> &CacheGateway {
        &self.gateway
    }

    pub fn durable(&self) -> &D {
        &self.durable
    }

    // == Put ==
    /// Writes the record durably, then mirrors it into the cache.
    ///
    /// The cache write happens even when nothing changed. A durable failure
    /// returns before the cache is touched.
    pub fn put(&self, record: &R) -> Result<StoredHandle> {
        if record.key().is_empty() {
            return Err(StoreError::InvalidRequest(
                "Record key cannot be empty".to_string(),
            ));
        }

        let handle = self.durable.put(record)?;
        debug!(key = record.key(), version = handle.version, "record stored");
        self.cache(record);
        Ok(handle)
    }

    // == Delete ==
    /// Deletes the record durably, then invalidates its cache entry.
    pub fn delete(&self, record: &R) -> Result<()> {
        self.durable.delete(record)?;
        debug!(key = record.key(), "record deleted");
        self.gateway.delete(record.key());
        Ok(())
    }

    // == Get By Key ==
    /// Uncached durable lookup.
    pub fn get_by_key(&self, key: &str) -> Result<Option<R>> {
        self.durable.get_by_key(key)
    }

    // == Cached Active Lookup ==
    /// Read-through lookup returning the record only while it is active.
    ///
    /// On a miss the durable record is cached whatever its status, so an
    /// inactive record still lands in the cache even though `None` is returned.
    pub fn get_cached_active_by_key(&self, key: &str) -> Result<Option<R>> {
        let record = match self.cached(key) {
            Some(record) => Some(record),
            None => {
                let record = self.get_by_key(key)?;
                if let Some(record) = &record {
                    self.cache(record);
                }
                record
            }
        };

        Ok(record.filter(R::is_active))
    }

    fn cached(&self, key: &str) -> Option<R> {
        let bytes = self.gateway.get(key)?;
        match serde_json::from_slice(&bytes) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(key, error = %err, "undecodable cache entry, falling back to store");
                None
            }
        }
    }

    /// Mirrors the record into the cache, or invalidates its key when the
    /// record cannot be stored so no older snapshot outlives this write.
    fn cache(&self, record: &R) {
        let stored = match serde_json::to_vec(record) {
            Ok(bytes) => self.gateway.set(record.key(), bytes),
            Err(err) => {
                warn!(key = record.key(), error = %err, "record not serializable");
                false
            }
        };

        if !stored && self.gateway.is_enabled() {
            debug!(key = record.key(), "cache write not stored, invalidating");
            self.gateway.delete(record.key());
        }
    }
}

impl<R, D: std::fmt::Debug> std::fmt::Debug for RecordStore<R, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("durable", &self.durable)
            .field("gateway", &self.gateway)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheCounters, CacheService, MemoryCache, MAX_VALUE_SIZE};
    use crate::runtime::CacheFlag;
    use crate::store::{MemoryDurableStore, Student};

    type Store = RecordStore<Student, MemoryDurableStore<Student>>;

    fn new_store(enabled: bool) -> (Store, Arc<MemoryCache>) {
        let cache = Arc::new(MemoryCache::new(100));
        let gateway = CacheGateway::new(
            cache.clone(),
            Arc::new(CacheFlag::fixed(enabled)),
            Arc::new(CacheCounters::new()),
        );
        (
            RecordStore::new(MemoryDurableStore::new(), Arc::new(gateway)),
            cache,
        )
    }

    fn cached_student(cache: &MemoryCache, key: &str) -> Option<Student> {
        cache
            .get(key)
            .unwrap()
            .map(|bytes| serde_json::from_slice(&bytes).unwrap())
    }

    struct FailingStore;

    impl DurableStore<Student> for FailingStore {
        fn put(&self, _record: &Student) -> Result<StoredHandle> {
            Err(StoreError::DurableStoreFailure("quota exceeded".into()))
        }

        fn delete(&self, _record: &Student) -> Result<()> {
            Err(StoreError::DurableStoreFailure("quota exceeded".into()))
        }

        fn get_by_key(&self, _key: &str) -> Result<Option<Student>> {
            Err(StoreError::DurableStoreFailure("timeout".into()))
        }
    }

    #[test]
    fn test_put_writes_through() {
        let (store, cache) = new_store(true);
        let ann = Student::new("a@x.com", "Ann").with_enrollment(true);

        let handle = store.put(&ann).unwrap();

        assert_eq!(handle.version, 1);
        assert_eq!(cached_student(&cache, "a@x.com"), Some(ann.clone()));
        assert_eq!(store.get_by_key("a@x.com").unwrap(), Some(ann));
        assert_eq!(store.gateway().stats().puts, 1);
    }

    #[test]
    fn test_put_caches_even_when_unchanged() {
        let (store, _) = new_store(true);
        let ann = Student::new("a@x.com", "Ann");

        store.put(&ann).unwrap();
        store.put(&ann).unwrap();

        assert_eq!(store.gateway().stats().puts, 2);
    }

    #[test]
    fn test_put_empty_key_rejected() {
        let (store, cache) = new_store(true);

        let result = store.put(&Student::new("", "Nobody"));

        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_active_record_returned() {
        let (store, _) = new_store(true);
        let ann = Student::new("a@x.com", "Ann").with_enrollment(true);
        store.put(&ann).unwrap();

        assert_eq!(store.get_cached_active_by_key("a@x.com").unwrap(), Some(ann));
        assert_eq!(store.gateway().stats().hits, 1);
    }

    #[test]
    fn test_inactive_record_filtered_but_cached() {
        let (store, cache) = new_store(true);
        let ann = Student::new("a@x.com", "Ann").with_enrollment(false);
        store.put(&ann).unwrap();

        assert_eq!(store.get_cached_active_by_key("a@x.com").unwrap(), None);
        assert_eq!(cached_student(&cache, "a@x.com"), Some(ann));
    }

    #[test]
    fn test_read_through_populates_cache_on_miss() {
        let (store, cache) = new_store(true);
        let ann = Student::new("a@x.com", "Ann").with_enrollment(false);
        // Bypass the cache so the first lookup misses
        store.durable().put(&ann).unwrap();

        assert_eq!(store.get_cached_active_by_key("a@x.com").unwrap(), None);

        assert_eq!(cached_student(&cache, "a@x.com"), Some(ann));
        let stats = store.gateway().stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.puts, 1);
    }

    #[test]
    fn test_absent_record_not_cached() {
        let (store, cache) = new_store(true);

        assert_eq!(store.get_cached_active_by_key("ghost@x.com").unwrap(), None);

        assert!(cache.is_empty());
        assert_eq!(store.gateway().stats().puts, 0);
    }

    #[test]
    fn test_delete_invalidates_cache() {
        let (store, cache) = new_store(true);
        let ann = Student::new("a@x.com", "Ann").with_enrollment(true);
        store.put(&ann).unwrap();

        store.delete(&ann).unwrap();

        assert_eq!(store.get_by_key("a@x.com").unwrap(), None);
        assert_eq!(store.get_cached_active_by_key("a@x.com").unwrap(), None);
        assert!(cache.peek("a@x.com").is_none());
    }

    #[test]
    fn test_status_change_visible_through_cache() {
        let (store, _) = new_store(true);
        let mut ann = Student::new("a@x.com", "Ann").with_enrollment(true);
        store.put(&ann).unwrap();
        assert!(store.get_cached_active_by_key("a@x.com").unwrap().is_some());

        ann.is_enrolled = false;
        store.put(&ann).unwrap();

        assert_eq!(store.get_cached_active_by_key("a@x.com").unwrap(), None);
    }

    #[test]
    fn test_stale_cache_served_until_overwritten() {
        let (store, _) = new_store(true);
        let ann = Student::new("a@x.com", "Ann").with_enrollment(true);
        store.put(&ann).unwrap();

        // Another writer updates durable storage without touching the cache
        let renamed = Student {
            name: Some("Annie".to_string()),
            ..ann.clone()
        };
        store.durable().put(&renamed).unwrap();

        assert_eq!(store.get_cached_active_by_key("a@x.com").unwrap(), Some(ann));
    }

    #[test]
    fn test_undecodable_cache_entry_falls_back() {
        let (store, cache) = new_store(true);
        let ann = Student::new("a@x.com", "Ann").with_enrollment(true);
        store.durable().put(&ann).unwrap();
        cache.set("a@x.com", b"not json".to_vec(), 60).unwrap();

        assert_eq!(
            store.get_cached_active_by_key("a@x.com").unwrap(),
            Some(ann.clone())
        );
        assert_eq!(cached_student(&cache, "a@x.com"), Some(ann));
    }

    #[test]
    fn test_oversized_record_invalidates_previous_snapshot() {
        let (store, cache) = new_store(true);
        let ann = Student::new("a@x.com", "Ann").with_enrollment(true);
        store.put(&ann).unwrap();

        let unenrolled = Student {
            is_enrolled: false,
            answers: Some("x".repeat(MAX_VALUE_SIZE + 100 * 1024)),
            ..ann
        };
        store.put(&unenrolled).unwrap();

        assert!(cache.peek("a@x.com").is_none());
        assert_eq!(store.get_cached_active_by_key("a@x.com").unwrap(), None);
        assert!(cache.peek("a@x.com").is_none());
        assert!(!store.get_by_key("a@x.com").unwrap().unwrap().is_enrolled);
    }

    #[test]
    fn test_disabled_cache_reads_durable_store() {
        let (store, cache) = new_store(false);
        let ann = Student::new("a@x.com", "Ann").with_enrollment(true);
        store.put(&ann).unwrap();

        assert_eq!(store.get_cached_active_by_key("a@x.com").unwrap(), Some(ann));
        assert!(cache.is_empty());
        assert_eq!(store.gateway().stats().puts, 0);
    }

    #[test]
    fn test_durable_failures_propagate_and_skip_cache() {
        let cache = Arc::new(MemoryCache::new(10));
        let gateway = Arc::new(CacheGateway::new(
            cache.clone(),
            Arc::new(CacheFlag::fixed(true)),
            Arc::new(CacheCounters::new()),
        ));
        let store = RecordStore::new(FailingStore, gateway);
        let ann = Student::new("a@x.com", "Ann");

        assert!(matches!(
            store.put(&ann),
            Err(StoreError::DurableStoreFailure(_))
        ));
        assert!(matches!(
            store.delete(&ann),
            Err(StoreError::DurableStoreFailure(_))
        ));
        assert!(matches!(
            store.get_cached_active_by_key("a@x.com"),
            Err(StoreError::DurableStoreFailure(_))
        ));

        let stats = store.gateway().stats();
        assert_eq!(stats.puts, 0);
        assert_eq!(stats.deletes, 0);
        assert!(cache.is_empty());
    }
}
