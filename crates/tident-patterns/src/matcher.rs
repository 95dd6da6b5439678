//! Query → tables, against a pattern table and intent map.
//!
//! Pure functions over borrowed state; the index owns locking and caching.

use std::collections::BTreeSet;

use tident_core::constants::{DATE_COLUMN_TYPES, GEO_COLUMN_TERMS};
use tident_core::errors::TidentResult;
use tident_core::models::{EntityLabel, NlpToken};
use tident_core::traits::INlpProvider;
use tident_core::{Catalog, TableId};

use crate::builder::{normalize_column, TablePatterns};
use crate::intents::IntentMap;

/// Insertion-ordered table set.
#[derive(Debug, Default)]
struct Matches(Vec<TableId>);

impl Matches {
    fn add(&mut self, id: &TableId) {
        if !self.0.contains(id) {
            self.0.push(id.clone());
        }
    }
}

/// Full NLP-backed match. Any provider error is returned so the caller can
/// fall back to [`substring_match`].
pub fn nlp_match(
    catalog: &Catalog,
    patterns: &TablePatterns,
    intents: &IntentMap,
    nlp: &dyn INlpProvider,
    query: &str,
) -> TidentResult<Vec<TableId>> {
    let query_lower = query.to_lowercase();
    let tokens = nlp.tokenize(&query_lower)?;
    let entities = nlp.entities(&query_lower)?;
    let query_tokens: BTreeSet<&str> = tokens
        .iter()
        .filter(|t| t.is_content())
        .map(|t: &NlpToken| t.text.as_str())
        .collect();

    let mut matches = Matches::default();

    // Patterns: phrase substring, or every token present.
    for (table, table_patterns) in patterns {
        let hit = table_patterns.iter().filter(|p| !p.is_empty()).any(|p| {
            query_lower.contains(&p.phrase())
                || p.distinct_tokens().iter().all(|t| query_tokens.contains(t))
        });
        if hit {
            matches.add(table);
        }
    }

    // Entities.
    for entity in &entities {
        for (id, info) in catalog.tables() {
            let widened = match entity.label {
                EntityLabel::Date => info.columns.values().any(|c| {
                    DATE_COLUMN_TYPES.contains(&c.data_type.to_lowercase().as_str())
                }),
                EntityLabel::Gpe => info
                    .column_names_lower()
                    .any(|c| GEO_COLUMN_TERMS.iter().any(|t| c.contains(t))),
                EntityLabel::Other(_) => false,
            };
            if widened {
                matches.add(id);
            }
        }
    }

    // Intent keywords.
    for (_, keywords) in intents.iter() {
        for keyword in keywords.iter().filter(|k| !k.is_empty()) {
            if !query_lower.contains(keyword.as_str()) {
                continue;
            }
            for (id, info) in catalog.tables() {
                if info.column_names_lower().any(|c| c.contains(keyword.as_str())) {
                    matches.add(id);
                }
            }
        }
    }

    // One foreign-key hop from the tables matched so far.
    let direct = matches.0.clone();
    for id in &direct {
        if let Some(info) = catalog.table(id) {
            for fk in &info.foreign_keys {
                if catalog.contains(&fk.referenced_table) {
                    matches.add(&fk.referenced_table);
                }
            }
        }
    }

    Ok(matches.0)
}

/// Provider-free match: table name, schema name, or normalized column name
/// as a substring of the lowercased query.
pub fn substring_match(catalog: &Catalog, query: &str) -> Vec<TableId> {
    let query_lower = query.to_lowercase();
    let mut matches = Matches::default();
    for (id, info) in catalog.tables() {
        let named = query_lower.contains(&id.table().to_lowercase())
            || query_lower.contains(&id.schema().to_lowercase());
        let by_column = info
            .columns
            .keys()
            .any(|c| query_lower.contains(&normalize_column(c)));
        if named || by_column {
            matches.add(id);
        }
    }
    matches.0
}
