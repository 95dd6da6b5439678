//! Wire form of the catalog contract as supplied at bind time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Column metadata. `type` is the database type name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnInfo {
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForeignKeyDocument {
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

/// `{tables: {schema: [table]}, columns: {schema: {table: {col: info}}},
/// foreign_keys: {schema: {table: [fk]}}, views, version}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogDocument {
    pub tables: BTreeMap<String, Vec<String>>,
    pub columns: BTreeMap<String, BTreeMap<String, BTreeMap<String, ColumnInfo>>>,
    pub foreign_keys: BTreeMap<String, BTreeMap<String, Vec<ForeignKeyDocument>>>,
    pub views: BTreeMap<String, Vec<String>>,
    pub version: String,
}
