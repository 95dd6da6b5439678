use serde::{Deserialize, Serialize};

use super::defaults;

/// Confidence fusion and caller-surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Signal confidence when the pattern index matched anything.
    pub pattern_confidence: f64,
    /// Signal confidence when feedback matched anything.
    pub feedback_confidence: f64,
    /// Minimum synonym score for a table to join the working set.
    pub name_match_threshold: f64,
    /// Length of the ranked table list.
    pub max_ranked_tables: usize,
    /// Upper bound on identify attempts when the NLP provider is flaky.
    pub max_attempts: u32,
    /// Number of recent queries remembered.
    pub history_size: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            pattern_confidence: defaults::DEFAULT_PATTERN_CONFIDENCE,
            feedback_confidence: defaults::DEFAULT_FEEDBACK_CONFIDENCE,
            name_match_threshold: defaults::DEFAULT_NAME_MATCH_THRESHOLD,
            max_ranked_tables: defaults::DEFAULT_MAX_RANKED_TABLES,
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            history_size: defaults::DEFAULT_HISTORY_SIZE,
        }
    }
}
