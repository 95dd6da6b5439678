//! Feedback row CRUD. Rows are keyed by exact query text; tables are a
//! JSON array of `schema.table` strings.

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::warn;

use tident_core::errors::{StorageError, TidentResult};
use tident_core::models::{FeedbackRecord, RankedQuery};
use tident_core::TableId;

use crate::to_storage_err;

pub fn upsert_feedback(conn: &Connection, record: &FeedbackRecord) -> TidentResult<()> {
    let tables = serde_json::to_string(&record.tables)?;
    conn.execute(
        "INSERT INTO feedback (query, tables, weight) VALUES (?1, ?2, ?3)
         ON CONFLICT(query) DO UPDATE SET
            tables = excluded.tables,
            weight = excluded.weight,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![record.query, tables, record.weight],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_feedback(conn: &Connection, query: &str) -> TidentResult<Option<FeedbackRecord>> {
    let row = conn
        .query_row(
            "SELECT query, tables, weight FROM feedback WHERE query = ?1",
            params![query],
            raw_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    match row {
        Some(raw) => parse_row(raw).map(Some),
        None => Ok(None),
    }
}

/// Every row in insertion order. Rows with unparseable tables are skipped.
pub fn all_feedback(conn: &Connection) -> TidentResult<Vec<FeedbackRecord>> {
    let mut stmt = conn
        .prepare("SELECT query, tables, weight FROM feedback ORDER BY rowid")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], raw_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut records = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        match parse_row(raw) {
            Ok(record) => records.push(record),
            Err(e) => warn!(error = %e, "skipping corrupt feedback row"),
        }
    }
    Ok(records)
}

pub fn top_queries(conn: &Connection, limit: usize) -> TidentResult<Vec<RankedQuery>> {
    let mut stmt = conn
        .prepare(
            "SELECT f.query, f.tables, f.weight, COALESCE(qc.count, 0) AS count
             FROM feedback f
             LEFT JOIN query_counts qc ON f.query = qc.query
             ORDER BY count DESC, f.weight DESC, f.rowid ASC
             LIMIT ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok((raw_row(row)?, row.get::<_, i64>(3)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut ranked = Vec::new();
    for row in rows {
        let (raw, count) = row.map_err(|e| to_storage_err(e.to_string()))?;
        match parse_row(raw) {
            Ok(record) => ranked.push(RankedQuery {
                query: record.query,
                tables: record.tables,
                weight: record.weight,
                count: count.max(0) as u64,
            }),
            Err(e) => warn!(error = %e, "skipping corrupt feedback row"),
        }
    }
    Ok(ranked)
}

pub fn delete_all(conn: &Connection) -> TidentResult<usize> {
    conn.execute("DELETE FROM feedback", [])
        .map_err(|e| to_storage_err(e.to_string()))
}

type RawRow = (String, String, f64);

fn raw_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn parse_row((query, tables, weight): RawRow) -> TidentResult<FeedbackRecord> {
    let tables: Vec<TableId> =
        serde_json::from_str(&tables).map_err(|e| StorageError::CorruptRow {
            query: query.clone(),
            details: e.to_string(),
        })?;
    Ok(FeedbackRecord {
        query,
        tables,
        weight,
    })
}
