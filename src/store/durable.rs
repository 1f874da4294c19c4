//! Durable Store Module
//!
//! The authoritative keyed record repository, and an in-memory implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::Serialize;

use crate::error::{Result, StoreError};
use crate::store::Record;

// == Stored Handle ==
/// Result of a durable write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredHandle {
    /// Key the record was stored under
    pub key: String,
    /// Number of writes the key has seen, starting at 1
    pub version: u64,
}

// == Durable Store ==
/// Strongly consistent single-key storage for records of type `R`.
///
/// Errors are `StoreError::DurableStoreFailure` and reach the caller unchanged.
pub trait DurableStore<R: Record>: Send + Sync {
    /// Inserts or fully overwrites the record under its key.
    fn put(&self, record: &R) -> Result<StoredHandle>;

    /// Removes the record. Removing an absent record succeeds.
    fn delete(&self, record: &R) -> Result<()>;

    fn get_by_key(&self, key: &str) -> Result<Option<R>>;
}

// == Memory Durable Store ==
/// Process-local durable store, used by the server binary and in tests.
#[derive(Debug)]
pub struct MemoryDurableStore<R> {
    records: RwLock<HashMap<String, Versioned<R>>>,
}

#[derive(Debug)]
struct Versioned<R> {
    record: R,
    version: u64,
}

impl<R> MemoryDurableStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R> Default for MemoryDurableStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::DurableStoreFailure("record lock poisoned".to_string())
}

impl<R: Record> DurableStore<R> for MemoryDurableStore<R> {
    fn put(&self, record: &R) -> Result<StoredHandle> {
        let key = record.key().to_string();
        let mut records = self.records.write().map_err(|_| poisoned())?;

        let version = records.get(&key).map_or(1, |v| v.version + 1);
        records.insert(
            key.clone(),
            Versioned {
                record: record.clone(),
                version,
            },
        );

        Ok(StoredHandle { key, version })
    }

    fn delete(&self, record: &R) -> Result<()> {
        self.records
            .write()
            .map_err(|_| poisoned())?
            .remove(record.key());
        Ok(())
    }

    fn get_by_key(&self, key: &str) -> Result<Option<R>> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(key).map(|v| v.record.clone()))
    }
}
