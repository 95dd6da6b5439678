//! v001: feedback rows and per-query usage counts.

use rusqlite::Connection;

use tident_core::errors::TidentResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> TidentResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS feedback (
            query       TEXT PRIMARY KEY,
            tables      TEXT NOT NULL DEFAULT '[]',
            weight      REAL NOT NULL DEFAULT 1.0,
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS query_counts (
            query   TEXT PRIMARY KEY,
            count   INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_query_counts_count ON query_counts(count);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
