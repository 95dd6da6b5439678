//! # tident-patterns
//!
//! Literal token patterns and intent keywords derived from the catalog,
//! matched against queries and extended by confirmed feedback.

pub mod builder;
pub mod index;
pub mod intents;
pub mod matcher;

pub use builder::{build_patterns, TablePatterns};
pub use index::PatternIndex;
pub use intents::IntentMap;
