use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;
use test_fixtures::{bikestores_catalog, tid};
use tident_core::config::{RankingConfig, WeightConfig};
use tident_core::TableId;
use tident_ranker::{fuse, Signals, WeightLedger};
use tident_storage::MemoryCache;

const TABLES: [&str; 5] = [
    "sales.customers",
    "sales.orders",
    "sales.stores",
    "production.products",
    "production.brands",
];

fn tables_from(mask: &[bool]) -> Vec<TableId> {
    TABLES
        .iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(name, _)| tid(name))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn confidence_stays_in_unit_interval(
        pattern_mask in prop::collection::vec(any::<bool>(), 5),
        feedback_mask in prop::collection::vec(any::<bool>(), 5),
        scores in prop::collection::vec(0.0f64..4.0, 5),
        weights in prop::collection::vec(0.5f64..6.0, 5),
    ) {
        let signals = Signals {
            pattern_tables: tables_from(&pattern_mask),
            name_scores: TABLES.iter().map(|n| tid(n)).zip(scores).collect::<BTreeMap<_, _>>(),
            feedback_tables: tables_from(&feedback_mask),
        };
        let weight_map: BTreeMap<TableId, f64> =
            TABLES.iter().map(|n| tid(n)).zip(weights).collect();
        let result = fuse(&signals, &RankingConfig::default(), |t| {
            weight_map.get(t).copied().unwrap_or(1.0)
        });
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert!(result.tables.len() <= 5);
    }

    #[test]
    fn weights_never_drop_below_the_floor(
        rounds in prop::collection::vec(prop::collection::vec(0usize..9, 0..3), 1..30),
    ) {
        let catalog = bikestores_catalog();
        let all = catalog.all_tables();
        let ledger = WeightLedger::load(
            "prop",
            &catalog,
            Arc::new(MemoryCache::default()),
            &WeightConfig::default(),
        );
        for picks in rounds {
            let selected: Vec<TableId> = picks.iter().map(|i| all[*i].clone()).collect();
            ledger.adjust(&selected, &all);
        }
        prop_assert!(ledger.snapshot().values().all(|w| *w >= 0.5));
    }
}
