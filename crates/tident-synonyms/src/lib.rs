//! # tident-synonyms
//!
//! Per-table synonym lemmas learned from confirmed queries, scored against
//! new queries by literal hit, memoized match, and similarity.

pub mod file;
pub mod graph;
pub mod index;

pub use file::{load_synonyms, save_synonyms, synonyms_path, SynonymSet};
pub use graph::MatchGraph;
pub use index::SynonymIndex;
