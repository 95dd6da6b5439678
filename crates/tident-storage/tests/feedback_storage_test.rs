use std::collections::BTreeMap;

use tident_core::models::FeedbackRecord;
use tident_core::traits::IFeedbackStorage;
use tident_core::TableId;
use tident_storage::StorageEngine;

fn make_record(query: &str, tables: &[&str], weight: f64) -> FeedbackRecord {
    FeedbackRecord::new(
        query,
        tables.iter().map(|t| TableId::parse(t).unwrap()).collect(),
        weight,
    )
}

#[test]
fn upsert_overwrites_tables_and_weight() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.upsert_feedback(&make_record("q1", &["a.b"], 1.0)).unwrap();
    engine.upsert_feedback(&make_record("q1", &["a.c"], 0.5)).unwrap();

    let all = engine.all_feedback().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], make_record("q1", &["a.c"], 0.5));
}

#[test]
fn increment_counts_every_call() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert_eq!(engine.query_count("q1").unwrap(), 0);
    assert_eq!(engine.increment_count("q1").unwrap(), 1);
    assert_eq!(engine.increment_count("q1").unwrap(), 2);
    assert_eq!(engine.query_count("q1").unwrap(), 2);
}

#[test]
fn top_queries_order_by_count_then_weight() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.upsert_feedback(&make_record("rare", &["a.b"], 2.0)).unwrap();
    engine.upsert_feedback(&make_record("light", &["a.b"], 0.5)).unwrap();
    engine.upsert_feedback(&make_record("heavy", &["a.b"], 1.5)).unwrap();
    engine.increment_count("rare").unwrap();
    for q in ["light", "heavy"] {
        engine.increment_count(q).unwrap();
        engine.increment_count(q).unwrap();
    }

    let top = engine.top_queries(2).unwrap();
    let names: Vec<&str> = top.iter().map(|r| r.query.as_str()).collect();
    assert_eq!(names, vec!["heavy", "light"]);
    assert_eq!(top[0].count, 2);
}

#[test]
fn rows_without_counts_rank_last_with_zero() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.upsert_feedback(&make_record("uncounted", &["a.b"], 9.0)).unwrap();
    engine.upsert_feedback(&make_record("counted", &["a.b"], 1.0)).unwrap();
    engine.increment_count("counted").unwrap();

    let top = engine.top_queries(5).unwrap();
    assert_eq!(top[0].query, "counted");
    assert_eq!(top[1].query, "uncounted");
    assert_eq!(top[1].count, 0);
}

#[test]
fn clear_removes_rows_and_counts() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.upsert_feedback(&make_record("q1", &["a.b"], 1.0)).unwrap();
    engine.increment_count("q1").unwrap();
    engine.clear().unwrap();
    assert!(engine.all_feedback().unwrap().is_empty());
    assert!(engine.all_counts().unwrap().is_empty());
}

#[test]
fn import_rows_upserts_batch() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let records = vec![make_record("q1", &["a.b"], 1.0), make_record("q2", &["c.d"], 0.7)];
    let counts = BTreeMap::from([("q1".to_string(), 4), ("q2".to_string(), 1)]);
    engine.import_rows(&records, &counts).unwrap();

    assert_eq!(engine.all_feedback().unwrap(), records);
    assert_eq!(engine.all_counts().unwrap(), counts);
}

#[test]
fn file_backed_engine_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("feedback.db");
    {
        let engine = StorageEngine::open(&path).unwrap();
        engine.upsert_feedback(&make_record("q1", &["sales.orders"], 1.0)).unwrap();
        engine.increment_count("q1").unwrap();
    }
    let engine = StorageEngine::open(&path).unwrap();
    assert_eq!(
        engine.get_feedback("q1").unwrap(),
        Some(make_record("q1", &["sales.orders"], 1.0))
    );
    assert_eq!(engine.query_count("q1").unwrap(), 1);
}

#[test]
fn corrupt_rows_are_skipped() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.upsert_feedback(&make_record("good", &["a.b"], 1.0)).unwrap();
    engine
        .pool()
        .writer
        .with_conn_sync(|conn| {
            conn.execute(
                "INSERT INTO feedback (query, tables, weight) VALUES ('bad', 'not json', 1.0)",
                [],
            )
            .unwrap();
            Ok(())
        })
        .unwrap();

    let all = engine.all_feedback().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].query, "good");
    assert!(engine.get_feedback("bad").is_err());
}

#[test]
fn file_backed_engine_runs_in_wal_mode() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StorageEngine::open(&dir.path().join("wal.db")).unwrap();
    assert!(engine.journal_is_wal().unwrap());

    let memory = StorageEngine::open_in_memory().unwrap();
    assert!(!memory.journal_is_wal().unwrap());
}
