use std::sync::Arc;

use test_fixtures::{bikestores_catalog, historical_corpus_path, small_catalog, tid, StubNlpProvider};
use tident_core::traits::{ICacheStore, IFeedbackStorage, ITableScorer};
use tident_core::{Catalog, TidentConfig};
use tident_ranker::TableIdentifier;
use tident_storage::{MemoryCache, StorageEngine};

struct Harness {
    identifier: TableIdentifier,
    nlp: Arc<StubNlpProvider>,
    _dir: tempfile::TempDir,
}

fn harness_with(catalog: Catalog, nlp: StubNlpProvider, tweak: impl FnOnce(&mut TidentConfig)) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let mut config = TidentConfig::default();
    config.synonyms.data_dir = dir.path().to_string_lossy().into_owned();
    tweak(&mut config);
    let nlp = Arc::new(nlp);
    let cache: Arc<dyn ICacheStore> = Arc::new(MemoryCache::default());
    let storage: Arc<dyn IFeedbackStorage> = Arc::new(StorageEngine::open_in_memory().unwrap());
    let identifier = TableIdentifier::bind(catalog, "BikeStores", nlp.clone(), cache, storage, config);
    Harness {
        identifier,
        nlp,
        _dir: dir,
    }
}

fn harness(catalog: Catalog, nlp: StubNlpProvider) -> Harness {
    harness_with(catalog, nlp, |_| {})
}

#[test]
fn pattern_match_on_small_catalog() {
    let h = harness(small_catalog(), StubNlpProvider::new());
    let result = h.identifier.identify("show customer name list");
    assert_eq!(result.tables, vec![tid("sales.customers")]);
    assert!((result.confidence - 0.9).abs() < 1e-9);
    let breakdown = result.breakdown.unwrap();
    assert_eq!(breakdown.pattern_tables, vec![tid("sales.customers")]);
    assert!(breakdown.feedback_tables.is_empty());
}

#[test]
fn confirmed_synonym_identifies_later_query() {
    let h = harness(bikestores_catalog(), StubNlpProvider::new());
    let accepted = h.identifier.confirm("client list", &["sales.customers"]);
    assert_eq!(accepted, vec![tid("sales.customers")]);

    let result = h.identifier.identify("all clients");
    assert_eq!(result.tables.first(), Some(&tid("sales.customers")));
    assert!(result.confidence >= 0.9, "confidence was {}", result.confidence);
}

#[test]
fn confirmation_reweights_every_catalog_table() {
    let h = harness(bikestores_catalog(), StubNlpProvider::new());
    h.identifier.confirm("client list", &["sales.customers"]);

    let weights = h.identifier.weights();
    assert_eq!(weights.len(), 9);
    assert!((weights[&tid("sales.customers")] - 1.3).abs() < 1e-9);
    for (table, weight) in &weights {
        if *table != tid("sales.customers") {
            assert!((weight - 0.85).abs() < 1e-9, "{table} = {weight}");
        }
    }
}

#[test]
fn similar_feedback_contributes_tables() {
    let nlp = StubNlpProvider::new().with_similarity(
        "top customers by spend",
        "best customers by spending",
        0.9,
    );
    let h = harness(bikestores_catalog(), nlp);
    h.identifier
        .confirm("top customers by spend", &["sales.customers", "sales.orders"]);

    let result = h.identifier.identify("best customers by spending");
    assert!(result.tables.contains(&tid("sales.customers")));
    assert!(result.tables.contains(&tid("sales.orders")));
    assert!(result.confidence > 0.9);
    assert_eq!(
        result.breakdown.unwrap().feedback_confidence,
        0.95
    );
}

#[test]
fn historical_corpus_contributes_tables() {
    let nlp = StubNlpProvider::new().with_similarity("stock of products per store", "show product stock by store", 0.9);
    let h = harness_with(bikestores_catalog(), nlp, |config| {
        config.feedback.corpus_path = Some(historical_corpus_path().to_string_lossy().into_owned());
    });
    let result = h.identifier.identify("stock of products per store");
    let breakdown = result.breakdown.unwrap();
    assert_eq!(breakdown.feedback_tables, vec![tid("production.stocks"), tid("sales.stores")]);
}

#[test]
fn unknown_tables_are_dropped_on_confirm() {
    let h = harness(bikestores_catalog(), StubNlpProvider::new());
    let accepted = h.identifier.confirm("client list", &["nope.table", "SALES.Customers", "bad"]);
    assert_eq!(accepted, vec![tid("sales.customers")]);

    let none = h.identifier.confirm("client list", &["nope.table"]);
    assert!(none.is_empty());
    assert_eq!(h.identifier.query_count("client list"), 1);
}

#[test]
fn gate_rejects_unusable_queries() {
    let h = harness(bikestores_catalog(), StubNlpProvider::new());
    for query in ["customers", "12345678", "+1 555 0100", "the and of"] {
        let result = h.identifier.process_query(query);
        assert!(result.is_empty(), "{query} was accepted");
        assert_eq!(result.confidence, 0.0);
    }

    let french = harness(bikestores_catalog(), StubNlpProvider::new().with_language("fr"));
    assert!(french.identifier.process_query("liste des clients").is_empty());
}

#[test]
fn processed_queries_reach_feedback_in_normalized_form() {
    let nlp = StubNlpProvider::new().with_similarity("monthly revenue", "revenue report", 0.95);
    let h = harness(bikestores_catalog(), nlp);
    h.identifier.confirm("revenue report", &["sales.orders"]);

    // Raw text is too far from the stored query.
    let raw = h.identifier.identify("the monthly revenues!");
    assert!(raw.breakdown.map_or(true, |b| b.feedback_tables.is_empty()));

    let result = h.identifier.process_query("The MONTHLY revenues!");
    let breakdown = result.breakdown.unwrap();
    assert_eq!(breakdown.feedback_tables, vec![tid("sales.orders")]);
    assert_eq!(result.tables.first(), Some(&tid("sales.orders")));
    assert_eq!(h.identifier.recent_queries(1)[0].query, "The MONTHLY revenues!");
}

#[test]
fn processed_queries_name_pattern_tables() {
    let h = harness(small_catalog(), StubNlpProvider::new());
    let result = h.identifier.process_query("Show the customer names");
    // "sales.customers" also carries the schema word, which names sales.orders.
    assert_eq!(result.tables, vec![tid("sales.customers"), tid("sales.orders")]);
}

#[test]
fn offline_provider_still_matches_by_substring() {
    let h = harness(bikestores_catalog(), StubNlpProvider::unavailable());
    let result = h.identifier.process_query("show customers list");
    assert_eq!(result.tables, vec![tid("sales.customers")]);
    assert!(!h.identifier.degradations().is_empty());
}

#[test]
fn retries_stop_at_the_configured_limit() {
    let h = harness(bikestores_catalog(), StubNlpProvider::unavailable());
    let result = h.identifier.identify_with_retry("zzz qqq", 10);
    assert!(result.is_empty());
    // One degradation per outage, not per attempt.
    assert_eq!(h.identifier.degradations().len(), 1);

    h.nlp.set_available(true);
    h.identifier.identify("zzz qqq");
    assert!(h
        .identifier
        .degradations()
        .iter()
        .all(|d| d.recovered_at.is_some()));
}

#[test]
fn history_keeps_the_ten_newest_queries() {
    let h = harness(small_catalog(), StubNlpProvider::new());
    for i in 0..12 {
        h.identifier.process_query(&format!("customer query {i}"));
    }
    let recent = h.identifier.recent_queries(20);
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].query, "customer query 11");
    assert_eq!(recent[9].query, "customer query 2");
}

#[test]
fn identical_state_ranks_identically() {
    let h = harness(bikestores_catalog(), StubNlpProvider::new());
    let first = h.identifier.identify("show product names");
    let second = h.identifier.identify("show product names");
    assert_eq!(first, second);
    assert!(first.tables.len() <= 5);
}

#[test]
fn rebuild_resets_weights_and_keeps_the_catalog_id() {
    let h = harness(bikestores_catalog(), StubNlpProvider::new());
    h.identifier.confirm("client list", &["sales.customers"]);
    h.identifier.rebuild(small_catalog());

    assert_eq!(h.identifier.catalog_id(), "BikeStores");
    assert_eq!(h.identifier.catalog().len(), 2);
    let weights = h.identifier.weights();
    assert_eq!(weights.len(), 2);
    assert!(weights.values().all(|w| *w == 1.0));
    // Learned synonyms survive a rebuild.
    assert!(h.identifier.synonyms().contains_key(&tid("sales.customers")));
}

#[test]
fn ddl_for_named_tables() {
    let h = harness(small_catalog(), StubNlpProvider::new());
    let ddl = h.identifier.ddl(&["sales.customers", "sales.orders"]).unwrap();
    assert!(ddl.contains("CREATE TABLE [sales].[customers]"));
    assert!(ddl.contains("CREATE TABLE [sales].[orders]"));
    assert!(h.identifier.ddl(&["nope.table"]).is_err());
}

#[test]
fn feedback_round_trips_through_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feedback_export.json");
    let h = harness(bikestores_catalog(), StubNlpProvider::new());
    h.identifier.confirm("client list", &["sales.customers"]);
    h.identifier.confirm("client list", &["sales.customers"]);
    h.identifier.confirm("brand names", &["production.brands"]);
    let before = h.identifier.top_queries(None);

    assert_eq!(h.identifier.export_feedback(&path).unwrap(), 2);
    h.identifier.clear_feedback();
    assert!(h.identifier.top_queries(None).is_empty());

    assert_eq!(h.identifier.import_feedback(&path).unwrap(), 2);
    assert_eq!(h.identifier.top_queries(None), before);
    assert_eq!(before[0].query, "client list");
    assert_eq!(before[0].count, 2);
}

#[test]
fn weight_model_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models").join("BikeStores_model.json");
    let h = harness(small_catalog(), StubNlpProvider::new());
    h.identifier.export_model(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["weights"]["sales.customers"], 1.0);
}

#[test]
fn identifier_is_a_table_scorer() {
    let h = harness(small_catalog(), StubNlpProvider::new());
    let scorer: &dyn ITableScorer = &h.identifier;
    let result = scorer.score("show customer name list").unwrap();
    assert_eq!(result.tables, vec![tid("sales.customers")]);
    assert_eq!(scorer.name(), "tident");
}

#[test]
fn opened_identifier_persists_learning_at_the_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = TidentConfig::default();
    config.storage.db_path = dir.path().join("state").join("tident.db").to_string_lossy().into_owned();
    config.synonyms.data_dir = dir.path().to_string_lossy().into_owned();
    config.feedback.top_queries_limit = 1;
    config.observability.log_level = "warn".to_string();

    let weights = {
        let identifier =
            TableIdentifier::open(bikestores_catalog(), "BikeStores", Arc::new(StubNlpProvider::new()), config.clone())
                .unwrap();
        identifier.confirm("client list", &["sales.customers"]);
        identifier.confirm("brand names", &["production.brands"]);
        identifier.confirm("brand names", &["production.brands"]);
        identifier.weights()
    };
    assert!(dir.path().join("state").join("tident.db").exists());

    let reopened =
        TableIdentifier::open(bikestores_catalog(), "BikeStores", Arc::new(StubNlpProvider::new()), config).unwrap();
    let reloaded = reopened.weights();
    assert_eq!(reloaded.len(), weights.len());
    for (table, weight) in &weights {
        assert!((reloaded[table] - weight).abs() < 1e-9, "{table}");
    }
    assert!(weights[&tid("production.brands")] > weights[&tid("sales.stores")]);
    let top = reopened.top_queries(None);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].query, "brand names");
    assert_eq!(reopened.query_count("client list"), 1);
}
