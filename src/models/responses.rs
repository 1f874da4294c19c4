//! Response DTOs for the student store API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::store::StoredHandle;

/// Response body for PUT /students and the /me mutations
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// Success message
    pub message: String,
    pub key: String,
    /// Durable version written; absent when nothing was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

impl PutResponse {
    pub fn new(handle: StoredHandle) -> Self {
        Self {
            message: format!("Student '{}' stored successfully", handle.key),
            key: handle.key,
            version: Some(handle.version),
        }
    }

    /// Response for a mutation that left the record untouched.
    pub fn unchanged(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Student '{}' unchanged", key),
            key,
            version: None,
        }
    }
}

/// Response body for DELETE /students/:email
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Student '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Whether cache traffic is currently enabled
    pub enabled: bool,
    /// Counter values keyed by exported name
    pub counters: BTreeMap<&'static str, u64>,
    /// Counter help text keyed by exported name
    pub descriptions: BTreeMap<&'static str, &'static str>,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(enabled: bool, stats: CacheStats) -> Self {
        let named = stats.named();
        Self {
            enabled,
            counters: named.iter().map(|(info, value)| (info.name, *value)).collect(),
            descriptions: named
                .iter()
                .map(|(info, _)| (info.name, info.description))
                .collect(),
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for PUT /admin/cache
#[derive(Debug, Clone, Serialize)]
pub struct CacheFlagResponse {
    pub enabled: bool,
    #[serde(rename = "override")]
    pub override_value: Option<bool>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
