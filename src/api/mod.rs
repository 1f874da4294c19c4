//! API Module
//!
//! HTTP handlers and routing for the student store REST API.
//!
//! # Endpoints
//! - `PUT /students` - Create or replace a student profile
//! - `GET /students/:email` - Uncached profile lookup
//! - `GET /students/:email/enrolled` - Cached lookup of an enrolled student
//! - `DELETE /students/:email` - Delete a profile
//! - `PUT /me/name` - Rename the calling student
//! - `PUT /me/enrollment` - Change the calling student's enrollment
//! - `GET /stats` - Cache counters
//! - `PUT /admin/cache` - Toggle caching
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
