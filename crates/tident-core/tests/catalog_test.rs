use tident_core::catalog::*;
use tident_core::TidentError;

const SAMPLE: &str = r#"{
  "tables": {"sales": ["customers", "orders"], "production": ["products"]},
  "columns": {
    "sales": {
      "customers": {
        "customer_id": {"type": "int", "nullable": false, "is_primary_key": true, "is_foreign_key": false},
        "first_name": {"type": "varchar", "nullable": false, "is_primary_key": false, "is_foreign_key": false},
        "email": {"type": "varchar", "nullable": true, "is_primary_key": false, "is_foreign_key": false}
      },
      "orders": {
        "order_id": {"type": "int", "nullable": false, "is_primary_key": true, "is_foreign_key": false},
        "customer_id": {"type": "int", "nullable": true, "is_primary_key": false, "is_foreign_key": true}
      }
    }
  },
  "foreign_keys": {
    "sales": {
      "orders": [
        {"column": "customer_id", "referenced_table": "sales.customers", "referenced_column": "customer_id"},
        {"column": "staff_id", "referenced_table": "sales.staffs", "referenced_column": "staff_id"}
      ]
    }
  },
  "views": {},
  "version": "1.1"
}"#;

fn id(s: &str) -> TableId {
    TableId::parse(s).unwrap()
}

#[test]
fn parses_tables_columns_and_foreign_keys() {
    let catalog = Catalog::from_json(SAMPLE).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.version(), "1.1");
    assert_eq!(
        catalog.all_tables(),
        vec![id("production.products"), id("sales.customers"), id("sales.orders")]
    );

    let orders = catalog.table(&id("sales.orders")).unwrap();
    assert!(orders.has_column("order_id"));
    assert_eq!(orders.foreign_keys.len(), 2);
    assert_eq!(orders.foreign_keys[0].referenced_table, id("sales.customers"));
}

#[test]
fn missing_columns_become_empty_collections() {
    let catalog = Catalog::from_json(SAMPLE).unwrap();
    let products = catalog.table(&id("production.products")).unwrap();
    assert!(products.columns.is_empty());
    assert!(products.foreign_keys.is_empty());
}

#[test]
fn validate_reports_warnings_without_failing() {
    let catalog = Catalog::from_json(SAMPLE).unwrap();
    let warnings = catalog.validate();
    assert_eq!(warnings.len(), 2);
    assert!(warnings.iter().any(|w| w.contains("production.products has no columns")));
    assert!(warnings.iter().any(|w| w.contains("sales.staffs")));
}

#[test]
fn malformed_foreign_key_target_is_rejected() {
    let doc = r#"{
      "tables": {"sales": ["orders"]},
      "foreign_keys": {"sales": {"orders": [
        {"column": "customer_id", "referenced_table": "customers", "referenced_column": "id"}
      ]}}
    }"#;
    let err = Catalog::from_json(doc).unwrap_err();
    assert!(matches!(err, TidentError::CatalogError(_)));
}

#[test]
fn malformed_document_is_rejected() {
    assert!(Catalog::from_json("{\"tables\": 3}").is_err());
}

#[test]
fn resolve_tables_is_case_insensitive_and_canonicalises() {
    let catalog = Catalog::from_json(SAMPLE).unwrap();
    let (valid, invalid) =
        catalog.resolve_tables(&["SALES.Customers", "sales.nowhere", "orders", "sales.orders"]);
    assert_eq!(valid, vec![id("sales.customers"), id("sales.orders")]);
    assert_eq!(invalid, vec!["sales.nowhere".to_string(), "orders".to_string()]);
}

#[test]
fn ddl_marks_primary_keys_and_not_null() {
    let catalog = Catalog::from_json(SAMPLE).unwrap();
    let ddl = catalog.ddl(&id("sales.customers")).unwrap();
    assert!(ddl.starts_with("CREATE TABLE [sales].[customers] ("));
    assert!(ddl.contains("[customer_id] int PRIMARY KEY NOT NULL"));
    assert!(ddl.contains("[email] varchar\n") || ddl.contains("[email] varchar,"));
    assert!(ddl.ends_with(");"));
}

#[test]
fn ddl_for_unknown_table_is_not_found() {
    let catalog = Catalog::from_json(SAMPLE).unwrap();
    let err = catalog.ddl(&id("sales.staffs")).unwrap_err();
    assert!(matches!(err, TidentError::TableNotFound { .. }));
}
