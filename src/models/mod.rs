//! Request and Response models for the student store API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CacheToggleRequest, EnrollmentRequest, PutStudentRequest, RenameRequest};
pub use responses::{
    CacheFlagResponse, DeleteResponse, ErrorResponse, HealthResponse, PutResponse, StatsResponse,
};
