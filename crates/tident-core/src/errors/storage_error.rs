/// Durable-store errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("corrupt row for query '{query}': {details}")]
    CorruptRow { query: String, details: String },

    #[error("connection lock poisoned: {details}")]
    LockPoisoned { details: String },
}
