//! Shared fixtures for tident integration tests: a deterministic NLP stub,
//! cache doubles, and the BikeStores sample catalog.

mod caches;
mod stub_nlp;

use std::collections::BTreeMap;
use std::path::PathBuf;

use tident_core::catalog::{ColumnInfo, ForeignKey, TableInfo};
use tident_core::{Catalog, TableId};

pub use caches::{CorruptCache, FailingCache};
pub use stub_nlp::StubNlpProvider;

const BIKESTORES_CATALOG: &str = include_str!("../fixtures/bikestores_catalog.json");

/// Absolute path of a file under this crate's `fixtures/` directory.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(relative_path)
}

pub fn bikestores_catalog_json() -> &'static str {
    BIKESTORES_CATALOG
}

/// The nine-table BikeStores catalog (`sales` and `production` schemas).
///
/// # Panics
/// Panics if the bundled fixture fails to parse.
pub fn bikestores_catalog() -> Catalog {
    Catalog::from_json(BIKESTORES_CATALOG)
        .unwrap_or_else(|e| panic!("bundled BikeStores catalog is invalid: {e}"))
}

pub fn historical_corpus_path() -> PathBuf {
    fixture_path("historical_queries.json")
}

/// Same records as [`historical_corpus_path`], in the trainer CSV layout.
pub fn historical_corpus_csv_path() -> PathBuf {
    fixture_path("historical_queries.csv")
}

/// Shorthand for a known-good table identifier.
///
/// # Panics
/// Panics on a malformed identifier.
pub fn tid(value: &str) -> TableId {
    TableId::parse(value).unwrap_or_else(|e| panic!("bad fixture table id {value}: {e}"))
}

pub fn column(data_type: &str, nullable: bool) -> ColumnInfo {
    ColumnInfo {
        data_type: data_type.to_string(),
        nullable,
        ..ColumnInfo::default()
    }
}

/// Two-table catalog: `sales.customers(first_name, last_name)` and
/// `sales.orders(order_id, customer_id → sales.customers)`.
pub fn small_catalog() -> Catalog {
    let customers = TableInfo {
        columns: BTreeMap::from([
            ("first_name".to_string(), column("varchar", false)),
            ("last_name".to_string(), column("varchar", false)),
        ]),
        foreign_keys: Vec::new(),
    };
    let orders = TableInfo {
        columns: BTreeMap::from([
            ("order_id".to_string(), column("int", false)),
            ("customer_id".to_string(), column("int", true)),
        ]),
        foreign_keys: vec![ForeignKey {
            column: "customer_id".to_string(),
            referenced_table: tid("sales.customers"),
            referenced_column: "customer_id".to_string(),
        }],
    };
    Catalog::from_tables(BTreeMap::from([
        (tid("sales.customers"), customers),
        (tid("sales.orders"), orders),
    ]))
}
