use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::TableId;
use crate::config::defaults::DEFAULT_FEEDBACK_WEIGHT;

fn default_weight() -> f64 {
    DEFAULT_FEEDBACK_WEIGHT
}

/// A confirmed or corrected query → tables mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub tables: Vec<TableId>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl FeedbackRecord {
    pub fn new(query: impl Into<String>, tables: Vec<TableId>, weight: f64) -> Self {
        Self {
            query: query.into(),
            tables,
            weight,
        }
    }

    /// Entries with an empty query or no tables carry no signal.
    pub fn is_usable(&self) -> bool {
        !self.query.is_empty() && !self.tables.is_empty()
    }
}

/// A feedback row joined with its usage count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedQuery {
    pub query: String,
    pub tables: Vec<TableId>,
    pub weight: f64,
    pub count: u64,
}

/// Portable feedback document: `{feedback: [...], query_counts: {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackExport {
    pub feedback: Vec<FeedbackRecord>,
    pub query_counts: BTreeMap<String, u64>,
}

/// One historical query/tables pair from the training corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub tables: Vec<TableId>,
}
