use serde::{Deserialize, Serialize};

use super::defaults;

/// Fast-cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum entries held by the in-process L1 tier.
    pub l1_max_entries: u64,
    /// Time-to-live for L1 entries, in seconds.
    pub l1_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            l1_max_entries: defaults::DEFAULT_L1_MAX_ENTRIES,
            l1_ttl_secs: defaults::DEFAULT_L1_TTL_SECS,
        }
    }
}
