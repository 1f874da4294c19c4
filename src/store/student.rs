//! Student Module
//!
//! Student profile record and the student-specific store accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, StoreError};
use crate::store::{DurableStore, Record, RecordStore, StoredHandle};

// == Student ==
/// Student profile, keyed by email address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Email address, the record key
    pub email: String,
    /// Set once when the profile is created
    pub enrolled_date: DateTime<Utc>,
    pub name: Option<String>,
    pub is_enrolled: bool,
    /// JSON object text of the student's answers
    pub answers: Option<String>,
    /// JSON object text of the student's scores
    pub scores: Option<String>,
}

impl Student {
    /// New, not yet enrolled profile stamped with the current time.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            enrolled_date: Utc::now(),
            name: Some(name.into()),
            is_enrolled: false,
            answers: None,
            scores: None,
        }
    }

    pub fn with_enrollment(mut self, is_enrolled: bool) -> Self {
        self.is_enrolled = is_enrolled;
        self
    }
}

impl Record for Student {
    fn key(&self) -> &str {
        &self.email
    }

    fn is_active(&self) -> bool {
        self.is_enrolled
    }
}

// == Caller Identity ==
/// The signed-in user a user-scoped operation acts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub email: String,
}

impl CallerIdentity {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

fn require_caller(caller: Option<&CallerIdentity>) -> Result<&CallerIdentity> {
    caller.ok_or_else(|| StoreError::PreconditionViolation("No current user".to_string()))
}

// == Student Accessors ==
impl<D: DurableStore<Student>> RecordStore<Student, D> {
    /// Uncached lookup by email.
    pub fn get_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.get_by_key(email)
    }

    /// Cached lookup returning the student only while enrolled.
    pub fn get_enrolled_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.get_cached_active_by_key(email)
    }

    /// Renames the caller's profile. An empty name leaves it untouched.
    ///
    /// Returns the handle of the write, or `None` when nothing was written.
    pub fn rename_current(
        &self,
        caller: Option<&CallerIdentity>,
        new_name: &str,
    ) -> Result<Option<StoredHandle>> {
        let caller = require_caller(caller)?;
        if new_name.is_empty() {
            return Ok(None);
        }

        let mut student = self.load_for(caller)?;
        student.name = Some(new_name.to_string());
        let handle = self.put(&student)?;
        info!(email = %caller.email, "student renamed");
        Ok(Some(handle))
    }

    /// Sets the caller's enrollment status.
    pub fn set_enrollment_status_for_current(
        &self,
        caller: Option<&CallerIdentity>,
        is_enrolled: bool,
    ) -> Result<StoredHandle> {
        let caller = require_caller(caller)?;

        let mut student = self.load_for(caller)?;
        student.is_enrolled = is_enrolled;
        let handle = self.put(&student)?;
        info!(email = %caller.email, is_enrolled, "enrollment status changed");
        Ok(handle)
    }

    fn load_for(&self, caller: &CallerIdentity) -> Result<Student> {
        self.get_by_email(&caller.email)?
            .ok_or_else(|| StoreError::NotFound(caller.email.clone()))
    }
}
