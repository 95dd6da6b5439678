use serde::{Deserialize, Serialize};

use super::defaults;

/// Feedback store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Similarity above which a stored query counts as similar feedback.
    pub similarity_threshold: f64,
    /// Similarity above which a historical corpus record contributes tables.
    pub corpus_similarity_threshold: f64,
    /// Optional path to the historical query/table corpus (JSON list or trainer CSV).
    pub corpus_path: Option<String>,
    /// Default number of rows returned by top-query listings.
    pub top_queries_limit: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: defaults::DEFAULT_FEEDBACK_SIMILARITY_THRESHOLD,
            corpus_similarity_threshold: defaults::DEFAULT_CORPUS_SIMILARITY_THRESHOLD,
            corpus_path: None,
            top_queries_limit: defaults::DEFAULT_TOP_QUERIES_LIMIT,
        }
    }
}
