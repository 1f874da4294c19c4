//! Course Store - cached student record storage
//!
//! Durable keyed records fronted by a best-effort cache with write-through on
//! put, invalidation on delete and read-through on lookup.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod runtime;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, StoreError};
pub use tasks::spawn_cleanup_task;
