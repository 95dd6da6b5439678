use std::time::Duration;

use tident_observability::{init_tracing_with_filter, QueryLog, QueryLogEntry};

#[test]
fn query_log_keeps_the_newest_entries() {
    let mut log = QueryLog::with_capacity(3);
    for i in 0..5 {
        log.record(QueryLogEntry::new(format!("query {i}"), i, 0.5, Duration::from_millis(1)));
    }
    assert_eq!(log.count(), 3);
    let recent: Vec<String> = log.recent(10).into_iter().map(|e| e.query).collect();
    assert_eq!(recent, vec!["query 4", "query 3", "query 2"]);
    assert_eq!(log.recent(1)[0].query, "query 4");
}

#[test]
fn default_history_holds_ten_queries() {
    let mut log = QueryLog::default();
    for i in 0..12 {
        log.record(QueryLogEntry::new(format!("q{i}"), 0, 0.0, Duration::ZERO));
    }
    assert_eq!(log.count(), 10);
    assert_eq!(log.capacity(), 10);
}

#[test]
fn spans_and_repeated_init_do_not_panic() {
    init_tracing_with_filter("debug");
    assert!(!init_tracing_with_filter("info"));
    let span = tident_observability::identify_span!("BikeStores", "show customers");
    let _guard = span.enter();
    let _feedback = tident_observability::feedback_span!("BikeStores", "store");
    let rebuild = tident_observability::rebuild_span!("BikeStores", 9usize);
    assert_eq!(rebuild.metadata().map(|m| m.name()), Some("tident.rebuild"));
}
