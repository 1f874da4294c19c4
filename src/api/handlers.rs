//! API Handlers
//!
//! HTTP request handlers for each student store endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use tracing::info;

use crate::cache::{CacheCounters, CacheGateway, MemoryCache};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::models::{
    CacheFlagResponse, CacheToggleRequest, DeleteResponse, EnrollmentRequest, HealthResponse,
    PutResponse, PutStudentRequest, RenameRequest, StatsResponse,
};
use crate::runtime::{CacheFlag, Environment};
use crate::store::{CallerIdentity, MemoryDurableStore, Student, StudentStore};

/// Header carrying the signed-in user's email for `/me` endpoints.
pub const CALLER_HEADER: &str = "x-user-email";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-accelerated student store
    pub students: Arc<StudentStore>,
    /// In-process cache service behind the gateway, swept by the cleanup task
    pub cache: Arc<MemoryCache>,
}

impl AppState {
    pub fn new(students: Arc<StudentStore>, cache: Arc<MemoryCache>) -> Self {
        Self { students, cache }
    }

    /// Wires cache, gateway and durable store from configuration.
    pub fn from_config(config: &Config, environment: Arc<dyn Environment>) -> Self {
        let cache = Arc::new(MemoryCache::new(config.cache_max_entries));

        let flag = CacheFlag::new(environment);
        flag.set(config.memcache_enabled);

        let gateway = CacheGateway::new(
            cache.clone(),
            Arc::new(flag),
            Arc::new(CacheCounters::new()),
        )
        .with_ttl(config.cache_ttl);

        let students = StudentStore::new(MemoryDurableStore::new(), Arc::new(gateway));
        Self::new(Arc::new(students), cache)
    }
}

fn caller_from(headers: &HeaderMap) -> Option<CallerIdentity> {
    headers
        .get(CALLER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .map(CallerIdentity::new)
}

fn found(email: String, student: Option<Student>) -> Result<Json<Student>> {
    student.map(Json).ok_or(StoreError::NotFound(email))
}

/// Handler for PUT /students
///
/// Creates or fully replaces a student profile.
pub async fn put_student_handler(
    State(state): State<AppState>,
    Json(req): Json<PutStudentRequest>,
) -> Result<Json<PutResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    let enrolled_date = state
        .students
        .get_by_email(&req.email)?
        .map(|existing| existing.enrolled_date);
    let handle = state.students.put(&req.into_student(enrolled_date))?;

    Ok(Json(PutResponse::new(handle)))
}

/// Handler for GET /students/:email
///
/// Uncached lookup; returns the profile whatever its enrollment status.
pub async fn get_student_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Student>> {
    let student = state.students.get_by_email(&email)?;
    found(email, student)
}

/// Handler for GET /students/:email/enrolled
///
/// Cached lookup; 404 unless the student exists and is enrolled.
pub async fn get_enrolled_student_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Student>> {
    let student = state.students.get_enrolled_student_by_email(&email)?;
    found(email, student)
}

/// Handler for DELETE /students/:email
pub async fn delete_student_handler(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let student = state
        .students
        .get_by_email(&email)?
        .ok_or_else(|| StoreError::NotFound(email.clone()))?;
    state.students.delete(&student)?;

    Ok(Json(DeleteResponse::new(email)))
}

/// Handler for PUT /me/name
pub async fn rename_me_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RenameRequest>,
) -> Result<Json<PutResponse>> {
    let caller = caller_from(&headers);

    match state.students.rename_current(caller.as_ref(), &req.name)? {
        Some(handle) => Ok(Json(PutResponse::new(handle))),
        None => Ok(Json(PutResponse::unchanged(
            caller.map(|c| c.email).unwrap_or_default(),
        ))),
    }
}

/// Handler for PUT /me/enrollment
pub async fn enrollment_me_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<EnrollmentRequest>,
) -> Result<Json<PutResponse>> {
    let caller = caller_from(&headers);
    let handle = state
        .students
        .set_enrollment_status_for_current(caller.as_ref(), req.is_enrolled)?;

    Ok(Json(PutResponse::new(handle)))
}

/// Handler for GET /stats
///
/// Returns the cache counters for scraping.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let gateway = state.students.gateway();
    Json(StatsResponse::new(gateway.is_enabled(), gateway.stats()))
}

/// Handler for PUT /admin/cache
///
/// Forces caching on or off, or clears the override.
pub async fn cache_toggle_handler(
    State(state): State<AppState>,
    Json(req): Json<CacheToggleRequest>,
) -> Json<CacheFlagResponse> {
    let flag = state.students.gateway().flag();
    flag.set(req.enabled);
    info!(override_value = ?req.enabled, enabled = flag.value(), "cache flag updated");

    Json(CacheFlagResponse {
        enabled: flag.value(),
        override_value: flag.override_value(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
