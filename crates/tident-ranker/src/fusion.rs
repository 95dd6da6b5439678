//! Confidence fusion: union the three signals, scale the strongest by the
//! mean table weight, rank by weight.

use std::collections::BTreeMap;

use tident_core::config::RankingConfig;
use tident_core::models::{FusionBreakdown, Identification};
use tident_core::TableId;

/// Raw output of the three lookups for one query.
#[derive(Debug, Clone, Default)]
pub struct Signals {
    pub pattern_tables: Vec<TableId>,
    pub name_scores: BTreeMap<TableId, f64>,
    pub feedback_tables: Vec<TableId>,
}

/// Mean weight of `tables`, capped at 1.0. Empty input scores 0.
pub fn weight_score(tables: &[TableId], weight_of: impl Fn(&TableId) -> f64) -> f64 {
    if tables.is_empty() {
        return 0.0;
    }
    let total: f64 = tables.iter().map(&weight_of).sum();
    (total / tables.len() as f64).min(1.0)
}

/// Descending by weight; equal weights keep their input order.
pub fn rank_by_weight(
    mut tables: Vec<TableId>,
    weight_of: impl Fn(&TableId) -> f64,
    limit: usize,
) -> Vec<TableId> {
    tables.sort_by(|a, b| weight_of(b).total_cmp(&weight_of(a)));
    tables.truncate(limit);
    tables
}

fn push_all(working: &mut Vec<TableId>, tables: &[TableId]) {
    for table in tables {
        if !working.contains(table) {
            working.push(table.clone());
        }
    }
}

pub fn fuse(
    signals: &Signals,
    config: &RankingConfig,
    weight_of: impl Fn(&TableId) -> f64,
) -> Identification {
    let pattern_confidence = if signals.pattern_tables.is_empty() {
        0.0
    } else {
        config.pattern_confidence
    };

    let name_tables: Vec<TableId> = signals
        .name_scores
        .iter()
        .filter(|(_, score)| **score >= config.name_match_threshold)
        .map(|(table, _)| table.clone())
        .collect();
    // Every returned score counts, including those below the threshold.
    let name_confidence = signals.name_scores.values().copied().fold(0.0, f64::max);

    let feedback_confidence = if signals.feedback_tables.is_empty() {
        0.0
    } else {
        config.feedback_confidence
    };

    let mut working = Vec::new();
    push_all(&mut working, &signals.pattern_tables);
    push_all(&mut working, &name_tables);
    push_all(&mut working, &signals.feedback_tables);
    if working.is_empty() {
        return Identification::empty();
    }

    let weight_score = weight_score(&working, &weight_of);
    let strongest = pattern_confidence.max(name_confidence).max(feedback_confidence);
    let confidence = (strongest * weight_score).clamp(0.0, 1.0);
    let tables = rank_by_weight(working, &weight_of, config.max_ranked_tables);

    Identification {
        tables,
        confidence,
        breakdown: Some(FusionBreakdown {
            pattern_confidence,
            name_confidence,
            feedback_confidence,
            weight_score,
            pattern_tables: signals.pattern_tables.clone(),
            name_tables,
            feedback_tables: signals.feedback_tables.clone(),
        }),
    }
}
