//! v002: durable key/value table backing the L2 artifact cache.

use rusqlite::Connection;

use tident_core::errors::TidentResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> TidentResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS cache_entries (
            key         TEXT PRIMARY KEY,
            value       TEXT NOT NULL,
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
