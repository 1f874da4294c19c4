//! Request DTOs for the student store API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::cache::MAX_KEY_LENGTH;
use crate::store::Student;

/// Largest accepted `answers` or `scores` text, keeping a profile within one cache entry.
pub const MAX_BLOB_SIZE: usize = 256 * 1024;

/// Request body for PUT /students
///
/// Replaces the whole profile; omitted optional fields are cleared.
#[derive(Debug, Clone, Deserialize)]
pub struct PutStudentRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_enrolled: bool,
    /// JSON object text
    #[serde(default)]
    pub answers: Option<String>,
    /// JSON object text
    #[serde(default)]
    pub scores: Option<String>,
}

impl PutStudentRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.email.is_empty() {
            return Some("Email cannot be empty".to_string());
        }
        if self.email.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Email exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        for (field, text) in [("answers", &self.answers), ("scores", &self.scores)] {
            if let Some(text) = text {
                if text.len() > MAX_BLOB_SIZE {
                    return Some(format!(
                        "{} exceeds maximum size of {} bytes",
                        field, MAX_BLOB_SIZE
                    ));
                }
                if !is_json_object(text) {
                    return Some(format!("{} must be a JSON object", field));
                }
            }
        }
        None
    }

    /// Builds the record to store, keeping `enrolled_date` from any existing profile.
    pub fn into_student(self, enrolled_date: Option<DateTime<Utc>>) -> Student {
        Student {
            email: self.email,
            enrolled_date: enrolled_date.unwrap_or_else(Utc::now),
            name: self.name,
            is_enrolled: self.is_enrolled,
            answers: self.answers,
            scores: self.scores,
        }
    }
}

fn is_json_object(text: &str) -> bool {
    matches!(
        serde_json::from_str::<serde_json::Value>(text),
        Ok(serde_json::Value::Object(_))
    )
}

/// Request body for PUT /me/name
#[derive(Debug, Clone, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

/// Request body for PUT /me/enrollment
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentRequest {
    pub is_enrolled: bool,
}

/// Request body for PUT /admin/cache
///
/// `null` clears the override and returns to the environment default.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheToggleRequest {
    pub enabled: Option<bool>,
}
