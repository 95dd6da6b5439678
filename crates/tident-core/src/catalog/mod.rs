//! Read-only database catalog: tables, columns, foreign keys.

mod document;
mod table_id;

use std::collections::BTreeMap;

pub use document::{CatalogDocument, ColumnInfo, ForeignKeyDocument};
pub use table_id::TableId;

use crate::errors::{CatalogError, TidentError, TidentResult};

/// A resolved foreign key edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub column: String,
    pub referenced_table: TableId,
    pub referenced_column: String,
}

/// Columns and outgoing foreign keys of one table. Absent entries in the
/// document become empty collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableInfo {
    pub columns: BTreeMap<String, ColumnInfo>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableInfo {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Lowercased column names.
    pub fn column_names_lower(&self) -> impl Iterator<Item = String> + '_ {
        self.columns.keys().map(|c| c.to_lowercase())
    }
}

/// Typed catalog keyed by canonical table identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    tables: BTreeMap<TableId, TableInfo>,
    views: BTreeMap<String, Vec<String>>,
    version: String,
}

impl Catalog {
    pub fn from_json(source: &str) -> TidentResult<Self> {
        let document: CatalogDocument =
            serde_json::from_str(source).map_err(|e| CatalogError::Malformed {
                reason: e.to_string(),
            })?;
        Self::from_document(document)
    }

    /// Convert the wire form. Only tables listed under `tables` are bound;
    /// column and foreign-key entries for unlisted tables are ignored.
    pub fn from_document(mut document: CatalogDocument) -> TidentResult<Self> {
        let mut tables = BTreeMap::new();
        for (schema, names) in &document.tables {
            for name in names {
                let id = TableId::new(schema.as_str(), name.as_str())?;
                let columns = document
                    .columns
                    .get_mut(schema)
                    .and_then(|by_table| by_table.remove(name))
                    .unwrap_or_default();
                let mut foreign_keys = Vec::new();
                let fk_docs = document
                    .foreign_keys
                    .get_mut(schema)
                    .and_then(|by_table| by_table.remove(name))
                    .unwrap_or_default();
                for fk in fk_docs {
                    let referenced_table = TableId::parse(&fk.referenced_table).map_err(|_| {
                        CatalogError::InvalidForeignKey {
                            table: id.to_string(),
                            column: fk.column.clone(),
                            referenced: fk.referenced_table.clone(),
                        }
                    })?;
                    foreign_keys.push(ForeignKey {
                        column: fk.column,
                        referenced_table,
                        referenced_column: fk.referenced_column,
                    });
                }
                tables.insert(
                    id,
                    TableInfo {
                        columns,
                        foreign_keys,
                    },
                );
            }
        }
        Ok(Self {
            tables,
            views: document.views,
            version: document.version,
        })
    }

    /// Build directly from typed parts.
    pub fn from_tables(tables: BTreeMap<TableId, TableInfo>) -> Self {
        Self {
            tables,
            ..Self::default()
        }
    }

    pub fn table_ids(&self) -> impl Iterator<Item = &TableId> {
        self.tables.keys()
    }

    pub fn tables(&self) -> impl Iterator<Item = (&TableId, &TableInfo)> {
        self.tables.iter()
    }

    pub fn table(&self, id: &TableId) -> Option<&TableInfo> {
        self.tables.get(id)
    }

    pub fn contains(&self, id: &TableId) -> bool {
        self.tables.contains_key(id)
    }

    /// Every bound table, ordered by identifier.
    pub fn all_tables(&self) -> Vec<TableId> {
        self.tables.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn views(&self) -> &BTreeMap<String, Vec<String>> {
        &self.views
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Consistency warnings. Never fails.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for (id, info) in &self.tables {
            if info.columns.is_empty() {
                warnings.push(format!("table {id} has no columns defined"));
            }
            for fk in &info.foreign_keys {
                if !self.contains(&fk.referenced_table) {
                    warnings.push(format!(
                        "foreign key {id}.{} references non-existent table {}",
                        fk.column, fk.referenced_table
                    ));
                }
            }
        }
        warnings
    }

    /// Case-insensitive lookup of caller-supplied names. Returns
    /// `(valid, invalid)`; valid names use the catalog's spelling.
    pub fn resolve_tables<S: AsRef<str>>(&self, names: &[S]) -> (Vec<TableId>, Vec<String>) {
        let mut valid = Vec::new();
        let mut invalid = Vec::new();
        for name in names {
            let name = name.as_ref();
            let resolved = TableId::parse(name).ok().and_then(|wanted| {
                self.tables
                    .keys()
                    .find(|id| {
                        id.schema().eq_ignore_ascii_case(wanted.schema())
                            && id.table().eq_ignore_ascii_case(wanted.table())
                    })
                    .cloned()
            });
            match resolved {
                Some(id) => {
                    if !valid.contains(&id) {
                        valid.push(id);
                    }
                }
                None => invalid.push(name.to_string()),
            }
        }
        (valid, invalid)
    }

    /// `CREATE TABLE` statement for a bound table.
    pub fn ddl(&self, id: &TableId) -> TidentResult<String> {
        let info = self.table(id).ok_or_else(|| TidentError::TableNotFound {
            table: id.to_string(),
        })?;
        let column_defs: Vec<String> = info
            .columns
            .iter()
            .map(|(name, column)| {
                let mut def = format!("    [{name}] {}", column.data_type);
                if column.is_primary_key {
                    def.push_str(" PRIMARY KEY");
                }
                if !column.nullable {
                    def.push_str(" NOT NULL");
                }
                def
            })
            .collect();
        Ok(format!(
            "CREATE TABLE [{}].[{}] (\n{}\n);",
            id.schema(),
            id.table(),
            column_defs.join(",\n")
        ))
    }
}
