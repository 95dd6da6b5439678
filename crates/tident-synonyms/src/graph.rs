use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tident_core::TableId;

/// Memoized `lemma → {table → score}` associations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchGraph(BTreeMap<String, BTreeMap<TableId, f64>>);

impl MatchGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, lemma: &str, table: &TableId) -> Option<f64> {
        self.0.get(lemma).and_then(|tables| tables.get(table)).copied()
    }

    /// Keep the higher of the existing and the new score.
    pub fn record(&mut self, lemma: &str, table: &TableId, score: f64) {
        let entry = self
            .0
            .entry(lemma.to_string())
            .or_default()
            .entry(table.clone())
            .or_insert(score);
        if score > *entry {
            *entry = score;
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
