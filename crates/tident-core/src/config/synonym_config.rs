use serde::{Deserialize, Serialize};

use super::defaults;

/// Synonym index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynonymConfig {
    /// Directory holding the per-catalog synonym files.
    pub data_dir: String,
    /// Score added for each literal synonym hit.
    pub literal_hit_score: f64,
    /// Similarity above which a lemma counts as a synonym match.
    pub similarity_threshold: f64,
}

impl Default for SynonymConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::DEFAULT_SYNONYM_DATA_DIR.to_string(),
            literal_hit_score: defaults::DEFAULT_LITERAL_HIT_SCORE,
            similarity_threshold: defaults::DEFAULT_SYNONYM_SIMILARITY_THRESHOLD,
        }
    }
}
