//! # tident-feedback
//!
//! Durable query → tables feedback with a best-effort cache mirror, usage
//! counts, portable export/import, and the historical query corpus.

pub mod corpus;
pub mod store;

pub use corpus::HistoricalCorpus;
pub use store::FeedbackStore;
