use serde::{Deserialize, Serialize};

use crate::catalog::TableId;

/// Ranked tables plus fused confidence in `[0, 1]`. An empty table list is
/// the signal to fall back to manual selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Identification {
    pub tables: Vec<TableId>,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<FusionBreakdown>,
}

impl Identification {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Per-signal contributions behind one identification.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FusionBreakdown {
    pub pattern_confidence: f64,
    pub name_confidence: f64,
    pub feedback_confidence: f64,
    pub weight_score: f64,
    pub pattern_tables: Vec<TableId>,
    pub name_tables: Vec<TableId>,
    pub feedback_tables: Vec<TableId>,
}
