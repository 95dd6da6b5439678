//! StorageEngine: owns the connection pool, runs migrations, implements
//! `IFeedbackStorage`, and backs the durable cache tier.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::Connection;
use tracing::{info, warn};

use tident_core::config::StorageConfig;
use tident_core::errors::{TidentError, TidentResult};
use tident_core::models::{FeedbackRecord, RankedQuery};
use tident_core::traits::IFeedbackStorage;

use crate::migrations;
use crate::pool::pragmas::verify_wal_mode;
use crate::pool::ConnectionPool;
use crate::queries::{cache_ops, count_ops, feedback_ops};
use crate::to_storage_err;

pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a file-backed engine, creating parent directories as needed.
    pub fn open(path: &Path) -> TidentResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    pub fn open_with_config(path: &Path, config: &StorageConfig) -> TidentResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TidentError::io(parent, e))?;
        }
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        let engine = Self { pool };
        engine.initialize()?;
        if !engine.journal_is_wal()? {
            warn!(path = %path.display(), "journal mode is not WAL, readers may block on writes");
        }
        info!(path = %path.display(), "storage engine opened");
        Ok(engine)
    }

    /// Open an in-memory engine. All reads go through the writer.
    pub fn open_in_memory() -> TidentResult<Self> {
        let engine = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> TidentResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    /// Whether the write connection runs in WAL mode. In-memory engines
    /// report `memory`, not WAL.
    pub fn journal_is_wal(&self) -> TidentResult<bool> {
        self.pool.writer.with_conn_sync(verify_wal_mode)
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn with_reader<F, T>(&self, f: F) -> TidentResult<T>
    where
        F: FnOnce(&Connection) -> TidentResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }

    fn with_writer<F, T>(&self, f: F) -> TidentResult<T>
    where
        F: FnOnce(&Connection) -> TidentResult<T>,
    {
        self.pool.writer.with_conn_sync(f)
    }

    // --- Cache entries ---

    pub fn cache_get(&self, key: &str) -> TidentResult<Option<String>> {
        self.with_reader(|conn| cache_ops::get(conn, key))
    }

    pub fn cache_set(&self, key: &str, value: &str) -> TidentResult<()> {
        self.with_writer(|conn| cache_ops::set(conn, key, value))
    }

    pub fn cache_delete(&self, key: &str) -> TidentResult<()> {
        self.with_writer(|conn| cache_ops::delete(conn, key))
    }

    /// Upsert a batch of rows and counts in one transaction.
    pub fn import_rows(
        &self,
        records: &[FeedbackRecord],
        counts: &BTreeMap<String, u64>,
    ) -> TidentResult<()> {
        self.with_writer(|conn| {
            conn.execute_batch("BEGIN IMMEDIATE")
                .map_err(|e| to_storage_err(e.to_string()))?;
            let result: TidentResult<()> = (|| {
                for record in records {
                    feedback_ops::upsert_feedback(conn, record)?;
                }
                for (query, count) in counts {
                    count_ops::set_count(conn, query, *count)?;
                }
                Ok(())
            })();
            match result {
                Ok(()) => conn
                    .execute_batch("COMMIT")
                    .map_err(|e| to_storage_err(e.to_string())),
                Err(e) => {
                    let _ = conn.execute_batch("ROLLBACK");
                    Err(e)
                }
            }
        })
    }
}

impl IFeedbackStorage for StorageEngine {
    fn upsert_feedback(&self, record: &FeedbackRecord) -> TidentResult<()> {
        self.with_writer(|conn| feedback_ops::upsert_feedback(conn, record))
    }

    fn get_feedback(&self, query: &str) -> TidentResult<Option<FeedbackRecord>> {
        self.with_reader(|conn| feedback_ops::get_feedback(conn, query))
    }

    fn all_feedback(&self) -> TidentResult<Vec<FeedbackRecord>> {
        self.with_reader(feedback_ops::all_feedback)
    }

    fn increment_count(&self, query: &str) -> TidentResult<u64> {
        self.with_writer(|conn| count_ops::increment(conn, query))
    }

    fn query_count(&self, query: &str) -> TidentResult<u64> {
        self.with_reader(|conn| count_ops::get_count(conn, query))
    }

    fn set_count(&self, query: &str, count: u64) -> TidentResult<()> {
        self.with_writer(|conn| count_ops::set_count(conn, query, count))
    }

    fn all_counts(&self) -> TidentResult<BTreeMap<String, u64>> {
        self.with_reader(count_ops::all_counts)
    }

    fn top_queries(&self, limit: usize) -> TidentResult<Vec<RankedQuery>> {
        self.with_reader(|conn| feedback_ops::top_queries(conn, limit))
    }

    fn import_batch(
        &self,
        records: &[FeedbackRecord],
        counts: &BTreeMap<String, u64>,
    ) -> TidentResult<()> {
        self.import_rows(records, counts)
    }

    fn clear(&self) -> TidentResult<()> {
        self.with_writer(|conn| {
            feedback_ops::delete_all(conn)?;
            count_ops::delete_all(conn)?;
            Ok(())
        })
    }
}
