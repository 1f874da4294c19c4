//! Cache Module
//!
//! Best-effort cache layer: the service contract, an in-process service with
//! TTL expiration, and the gateway that gates and counts cache traffic.

mod entry;
mod gateway;
mod memory;
mod service;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use gateway::CacheGateway;
pub use memory::MemoryCache;
pub use service::CacheService;
pub use stats::{
    CacheCounters, CacheStats, CounterInfo, CACHE_DELETE, CACHE_HIT, CACHE_MISS, CACHE_PUT,
};

// == Public Constants ==
/// Default time an entry stays in the cache, in seconds
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 250;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
