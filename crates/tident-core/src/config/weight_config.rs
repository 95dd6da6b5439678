use serde::{Deserialize, Serialize};

use super::defaults;

/// Weight ledger adjustment factors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// Weight assigned to a table the ledger has never seen.
    pub default_weight: f64,
    /// Lower bound every adjustment respects.
    pub floor: f64,
    /// Added to each confirmed table.
    pub selected_boost: f64,
    /// Multiplier for known tables that were not confirmed.
    pub unselected_penalty: f64,
    /// Multiplier for tracked tables absent from the active catalog.
    pub stale_decay: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            default_weight: defaults::DEFAULT_TABLE_WEIGHT,
            floor: defaults::DEFAULT_WEIGHT_FLOOR,
            selected_boost: defaults::DEFAULT_SELECTED_BOOST,
            unselected_penalty: defaults::DEFAULT_UNSELECTED_PENALTY,
            stale_decay: defaults::DEFAULT_STALE_DECAY,
        }
    }
}
