//! Versioned schema migrations, tracked in `schema_version`.

mod v001_feedback_tables;
mod v002_cache_entries;

use rusqlite::{params, Connection};
use tracing::{debug, info};

use tident_core::errors::{StorageError, TidentResult};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> TidentResult<()>;

const MIGRATIONS: [(u32, &str, MigrationFn); 2] = [
    (1, "feedback_tables", v001_feedback_tables::migrate),
    (2, "cache_entries", v002_cache_entries::migrate),
];

/// Highest known schema version.
pub const LATEST_VERSION: u32 = 2;

/// Apply every migration newer than the recorded version. Each runs in
/// its own transaction.
pub fn run_migrations(conn: &Connection) -> TidentResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    let mut applied = 0;
    for (version, name, migrate) in MIGRATIONS {
        if version <= current {
            continue;
        }
        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| to_storage_err(e.to_string()))?;
        let result = migrate(conn).and_then(|_| {
            conn.execute(
                "INSERT INTO schema_version (version, name) VALUES (?1, ?2)",
                params![version, name],
            )
            .map_err(|e| to_storage_err(e.to_string()))
        });
        match result {
            Ok(_) => {
                conn.execute_batch("COMMIT")
                    .map_err(|e| to_storage_err(e.to_string()))?;
                debug!(version, name, "applied migration");
                applied += 1;
            }
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(StorageError::MigrationFailed {
                    version,
                    reason: e.to_string(),
                }
                .into());
            }
        }
    }
    if applied > 0 {
        info!(applied, version = LATEST_VERSION, "schema migrated");
    }
    Ok(applied)
}

pub fn current_version(conn: &Connection) -> TidentResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_apply_once() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_migrations(&conn).unwrap(), 2);
        assert_eq!(run_migrations(&conn).unwrap(), 0);
        assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
    }
}
