/// Catalog binding errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("malformed catalog document: {reason}")]
    Malformed { reason: String },

    #[error("foreign key {table}.{column} references invalid table '{referenced}'")]
    InvalidForeignKey {
        table: String,
        column: String,
        referenced: String,
    },
}
