use proptest::prelude::*;
use tident_core::traits::IFeedbackStorage;
use tident_storage::StorageEngine;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn count_equals_number_of_increments(queries in prop::collection::vec("[a-c]{1,2}", 0..20)) {
        let engine = StorageEngine::open_in_memory().unwrap();
        for q in &queries {
            engine.increment_count(q).unwrap();
        }
        for q in &queries {
            let expected = queries.iter().filter(|other| *other == q).count() as u64;
            prop_assert_eq!(engine.query_count(q).unwrap(), expected);
        }
    }
}
