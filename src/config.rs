//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_CACHE_TTL_SECS;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit cache enable override; None = follow the runtime environment
    pub memcache_enabled: Option<bool>,
    /// TTL in seconds applied to every cache write
    pub cache_ttl: u64,
    /// Maximum number of entries the in-process cache can hold
    pub cache_max_entries: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MEMCACHE_ENABLED` - Force caching on or off (default: unset)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 3600)
    /// - `CACHE_MAX_ENTRIES` - In-process cache capacity (default: 10000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            memcache_enabled: env::var("MEMCACHE_ENABLED")
                .ok()
                .and_then(|v| parse_bool(&v)),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            memcache_enabled: None,
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            cache_max_entries: 10_000,
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses the boolean spellings accepted for flag variables.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
