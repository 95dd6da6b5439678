use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use test_fixtures::{bikestores_catalog, tid, StubNlpProvider};
use tident_core::Intent;
use tident_patterns::PatternIndex;
use tident_storage::MemoryCache;

const WORDS: &[&str] = &[
    "name", "store", "city", "quantity", "brand", "order", "price", "list", "customer", "zip",
];
const TABLES: &[&str] = &["sales.customers", "sales.stores", "production.stocks", "production.brands"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn patterns_and_intents_stay_duplicate_free(
        updates in prop::collection::vec(
            (prop::collection::vec(0..WORDS.len(), 1..5), 0..TABLES.len()),
            1..12,
        )
    ) {
        let index = PatternIndex::load(
            "BikeStores",
            Arc::new(bikestores_catalog()),
            Arc::new(StubNlpProvider::new()),
            Arc::new(MemoryCache::default()),
        );
        for (words, table) in &updates {
            let query: Vec<&str> = words.iter().map(|i| WORDS[*i]).collect();
            index.update(&query.join(" "), &[tid(TABLES[*table])]);
        }

        for (_, patterns) in index.patterns() {
            let unique: HashSet<_> = patterns.iter().collect();
            prop_assert_eq!(unique.len(), patterns.len());
        }
        let intents = index.intents();
        for intent in Intent::ALL {
            let keywords = intents.keywords(intent);
            let unique: HashSet<_> = keywords.iter().collect();
            prop_assert_eq!(unique.len(), keywords.len());
        }
    }
}
