//! # tident-ranker
//!
//! Fuses pattern, synonym, and feedback signals into a ranked table list
//! with a confidence, and learns from confirmations.

pub mod fusion;
pub mod gate;
pub mod identifier;
pub mod preprocess;
pub mod weights;

pub use fusion::{fuse, rank_by_weight, weight_score, Signals};
pub use gate::{validate_query, QueryRejection};
pub use identifier::TableIdentifier;
pub use preprocess::preprocess_query;
pub use weights::WeightLedger;
