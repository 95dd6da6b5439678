//! Artifact cache tiers implementing `ICacheStore`.

pub mod artifact;
mod memory;
mod sqlite;
mod tiered;

pub use artifact::{read_json, write_json, CacheRead};
pub use memory::MemoryCache;
pub use sqlite::SqliteCache;
pub use tiered::TieredCache;
