//! Error types for the record store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Unified error type for the cache gateway and record store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The cache service failed or is unreachable. Absorbed by the gateway.
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// The durable store rejected or failed an operation
    #[error("Durable store failure: {0}")]
    DurableStoreFailure(String),

    /// Caller-level misuse, such as a user-scoped mutation without a caller
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            StoreError::PreconditionViolation(_) => StatusCode::UNAUTHORIZED,
            StoreError::CacheUnavailable(_) | StoreError::DurableStoreFailure(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the record store.
pub type Result<T> = std::result::Result<T, StoreError>;
