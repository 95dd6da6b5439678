//! Per-query usage counts.

use std::collections::BTreeMap;

use rusqlite::{params, Connection, OptionalExtension};

use tident_core::errors::TidentResult;

use crate::to_storage_err;

/// Increment and return the new count.
pub fn increment(conn: &Connection, query: &str) -> TidentResult<u64> {
    let count: i64 = conn
        .query_row(
            "INSERT INTO query_counts (query, count) VALUES (?1, 1)
             ON CONFLICT(query) DO UPDATE SET count = count + 1
             RETURNING count",
            params![query],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count.max(0) as u64)
}

pub fn get_count(conn: &Connection, query: &str) -> TidentResult<u64> {
    let count: Option<i64> = conn
        .query_row(
            "SELECT count FROM query_counts WHERE query = ?1",
            params![query],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count.unwrap_or(0).max(0) as u64)
}

pub fn set_count(conn: &Connection, query: &str, count: u64) -> TidentResult<()> {
    let count = i64::try_from(count).unwrap_or(i64::MAX);
    conn.execute(
        "INSERT INTO query_counts (query, count) VALUES (?1, ?2)
         ON CONFLICT(query) DO UPDATE SET count = excluded.count",
        params![query, count],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn all_counts(conn: &Connection) -> TidentResult<BTreeMap<String, u64>> {
    let mut stmt = conn
        .prepare("SELECT query, count FROM query_counts")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut counts = BTreeMap::new();
    for row in rows {
        let (query, count) = row.map_err(|e| to_storage_err(e.to_string()))?;
        counts.insert(query, count.max(0) as u64);
    }
    Ok(counts)
}

pub fn delete_all(conn: &Connection) -> TidentResult<usize> {
    conn.execute("DELETE FROM query_counts", [])
        .map_err(|e| to_storage_err(e.to_string()))
}
