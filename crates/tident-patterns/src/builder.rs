//! Catalog → pattern table.

use std::collections::BTreeMap;

use tident_core::catalog::TableInfo;
use tident_core::models::Pattern;
use tident_core::{Catalog, TableId};

/// Ordered, duplicate-free patterns per table.
pub type TablePatterns = BTreeMap<TableId, Vec<Pattern>>;

/// Column triggers for multi-token patterns.
const COMPOSITES: &[(&[&str], &[&[&str]])] = &[
    (
        &["first_name", "last_name"],
        &[&["customer", "name"], &["employee", "name"]],
    ),
    (&["quantity", "stock"], &[&["stock", "availability"]]),
    (&["category_name"], &[&["product", "category"]]),
    (&["order_id"], &[&["order", "details"]]),
    (&["store_name"], &[&["store", "details"], &["stores"]]),
];

/// Underscores become spaces: `zip_code` → `zip code`.
pub fn normalize_column(name: &str) -> String {
    name.to_lowercase().replace('_', " ")
}

pub fn build_patterns(catalog: &Catalog) -> TablePatterns {
    catalog
        .tables()
        .map(|(id, info)| (id.clone(), table_patterns(id, info)))
        .collect()
}

fn table_patterns(id: &TableId, info: &TableInfo) -> Vec<Pattern> {
    let mut patterns = Vec::new();
    push_unique(&mut patterns, Pattern::single(id.table()));
    push_unique(&mut patterns, Pattern::single(id.schema()));

    for column in info.columns.keys() {
        push_unique(&mut patterns, Pattern::single(normalize_column(column)));
    }

    for (triggers, composites) in COMPOSITES {
        if triggers.iter().any(|c| info.has_column(c)) {
            for tokens in *composites {
                push_unique(&mut patterns, Pattern::new(tokens.iter().copied()));
            }
        }
    }
    patterns
}

/// Append unless already present. Returns whether it was added.
pub fn push_unique(patterns: &mut Vec<Pattern>, pattern: Pattern) -> bool {
    if pattern.is_empty() || patterns.contains(&pattern) {
        return false;
    }
    patterns.push(pattern);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customers_get_name_composites() {
        let catalog = test_fixtures::small_catalog();
        let patterns = build_patterns(&catalog);
        let customers = &patterns[&test_fixtures::tid("sales.customers")];
        let phrases: Vec<String> = customers.iter().map(Pattern::phrase).collect();
        assert_eq!(
            phrases,
            vec!["customers", "sales", "first name", "last name", "customer name", "employee name"]
        );
    }

    #[test]
    fn store_name_adds_store_composites() {
        let catalog = test_fixtures::bikestores_catalog();
        let patterns = build_patterns(&catalog);
        let stores = &patterns[&test_fixtures::tid("sales.stores")];
        assert!(stores.contains(&Pattern::new(["store", "details"])));
        assert!(stores.contains(&Pattern::single("stores")));
        // `stores` is both the table name and a composite; kept once.
        assert_eq!(stores.iter().filter(|p| p.phrase() == "stores").count(), 1);
    }
}
