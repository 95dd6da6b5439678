use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use tident_core::errors::{StorageError, TidentResult};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// The single serialized write connection.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, busy_timeout_ms: u32) -> TidentResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> TidentResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure with exclusive access to the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> TidentResult<T>
    where
        F: FnOnce(&Connection) -> TidentResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| StorageError::LockPoisoned {
            details: format!("write connection: {e}"),
        })?;
        f(&guard)
    }
}
