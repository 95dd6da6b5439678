use std::sync::Arc;

use proptest::prelude::*;
use test_fixtures::{tid, StubNlpProvider};
use tident_core::config::SynonymConfig;
use tident_synonyms::SynonymIndex;
use tident_storage::MemoryCache;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn repeated_updates_leave_synonyms_unchanged(
        words in prop::collection::vec("[a-z]{4,8}", 1..5),
        repeats in 2usize..4,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let config = SynonymConfig {
            data_dir: dir.path().to_string_lossy().into_owned(),
            ..SynonymConfig::default()
        };
        let index = SynonymIndex::load(
            "prop",
            Arc::new(StubNlpProvider::new()),
            Arc::new(MemoryCache::default()),
            &config,
        );
        let query = words.join(" ");
        let tables = [tid("sales.customers")];

        index.update_matches(&query, &tables);
        let once = index.synonyms();
        let graph = index.match_graph();
        for _ in 0..repeats {
            index.update_matches(&query, &tables);
        }
        prop_assert_eq!(index.synonyms(), once);
        prop_assert_eq!(index.match_graph(), graph);
    }
}
