//! # tident-core
//!
//! Foundation crate for the tident table identifier.
//! Defines the catalog model, shared types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use catalog::{Catalog, TableId};
pub use config::TidentConfig;
pub use errors::{TidentError, TidentResult};
pub use intent::Intent;
pub use models::{FeedbackRecord, Identification, Pattern};
