//! Tracing setup: structured JSON logging with span definitions and event types.

pub mod events;
pub mod spans;

use tracing_subscriber::EnvFilter;

use tident_core::config::defaults::DEFAULT_LOG_LEVEL;

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "TIDENT_LOG";

/// Install the global subscriber with structured JSON output.
///
/// Respects `TIDENT_LOG`, defaulting to `info`. Returns `false` when a
/// subscriber is already installed.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init()
        .is_ok()
}

/// Install the global subscriber with an explicit filter, e.g. the
/// configured `observability.log_level`.
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}
