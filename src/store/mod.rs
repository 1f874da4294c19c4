//! Store Module
//!
//! Durable record storage fronted by the cache gateway.

mod durable;
mod record;
mod student;

pub use durable::{DurableStore, MemoryDurableStore, StoredHandle};
pub use record::{Record, RecordStore};
pub use student::{CallerIdentity, Student};

/// Student store as wired by the server.
pub type StudentStore = RecordStore<Student, MemoryDurableStore<Student>>;
