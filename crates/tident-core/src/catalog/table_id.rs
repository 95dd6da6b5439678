use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TidentError;

/// Canonical `schema.table` identifier.
///
/// Case is kept as supplied by the catalog. Parsing requires exactly one dot
/// with a non-empty part on each side.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableId {
    schema: String,
    table: String,
}

impl TableId {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Result<Self, TidentError> {
        let schema = schema.into();
        let table = table.into();
        if schema.is_empty() || table.is_empty() || schema.contains('.') || table.contains('.') {
            return Err(TidentError::InvalidTableId {
                value: format!("{schema}.{table}"),
            });
        }
        Ok(Self { schema, table })
    }

    pub fn parse(value: &str) -> Result<Self, TidentError> {
        match value.split_once('.') {
            Some((schema, table)) => Self::new(schema, table).map_err(|_| {
                TidentError::InvalidTableId {
                    value: value.to_string(),
                }
            }),
            None => Err(TidentError::InvalidTableId {
                value: value.to_string(),
            }),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

impl FromStr for TableId {
    type Err = TidentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TableId {
    type Error = TidentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TableId> for String {
    fn from(id: TableId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_schema_and_table() {
        let id = TableId::parse("sales.customers").unwrap();
        assert_eq!(id.schema(), "sales");
        assert_eq!(id.table(), "customers");
        assert_eq!(id.to_string(), "sales.customers");
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for bad in ["customers", ".customers", "sales.", "a.b.c", ""] {
            assert!(TableId::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = TableId::new("production", "stocks").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"production.stocks\"");
        let back: TableId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<TableId>("\"stocks\"").is_err());
    }
}
