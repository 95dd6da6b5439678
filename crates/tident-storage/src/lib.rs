//! # tident-storage
//!
//! SQLite persistence for feedback rows and usage counts, plus the
//! key/value artifact cache in its in-process, durable, and tiered forms.

pub mod cache;
pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use cache::{read_json, write_json, CacheRead, MemoryCache, SqliteCache, TieredCache};
pub use engine::StorageEngine;

use tident_core::errors::{StorageError, TidentError};

/// Wrap a rusqlite failure message as a [`TidentError`].
pub fn to_storage_err(message: String) -> TidentError {
    StorageError::SqliteError { message }.into()
}
