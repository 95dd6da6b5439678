//! Error types. One enum per subsystem, all convertible into [`TidentError`].

mod cache_error;
mod catalog_error;
mod feedback_error;
mod nlp_error;
mod storage_error;

pub use cache_error::CacheError;
pub use catalog_error::CatalogError;
pub use feedback_error::FeedbackError;
pub use nlp_error::NlpError;
pub use storage_error::StorageError;

/// Top-level error for every tident operation.
#[derive(Debug, thiserror::Error)]
pub enum TidentError {
    #[error("invalid table identifier '{value}': expected schema.table")]
    InvalidTableId { value: String },

    #[error("table not found in catalog: {table}")]
    TableNotFound { table: String },

    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("io error at {path}: {reason}")]
    IoError { path: String, reason: String },

    #[error(transparent)]
    StorageError(#[from] StorageError),

    #[error(transparent)]
    CacheError(#[from] CacheError),

    #[error(transparent)]
    NlpError(#[from] NlpError),

    #[error(transparent)]
    CatalogError(#[from] CatalogError),

    #[error(transparent)]
    FeedbackError(#[from] FeedbackError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl TidentError {
    /// Build an [`TidentError::IoError`] from a path and an `std::io::Error`.
    pub fn io(path: impl AsRef<std::path::Path>, err: std::io::Error) -> Self {
        Self::IoError {
            path: path.as_ref().display().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type TidentResult<T> = Result<T, TidentError>;
