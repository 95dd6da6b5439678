//! Durable key/value artifact entries.

use rusqlite::{params, Connection, OptionalExtension};

use tident_core::errors::TidentResult;

use crate::to_storage_err;

pub fn get(conn: &Connection, key: &str) -> TidentResult<Option<String>> {
    conn.query_row(
        "SELECT value FROM cache_entries WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn set(conn: &Connection, key: &str, value: &str) -> TidentResult<()> {
    conn.execute(
        "INSERT INTO cache_entries (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![key, value],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn delete(conn: &Connection, key: &str) -> TidentResult<()> {
    conn.execute("DELETE FROM cache_entries WHERE key = ?1", params![key])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
