//! # tident-observability
//!
//! Structured tracing with span definitions, a bounded query log, and
//! degradation event tracking.

pub mod degradation;
pub mod query_log;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
