//! L2 durable cache backed by the `cache_entries` table. Survives restarts.

use std::sync::Arc;

use tident_core::errors::TidentResult;
use tident_core::traits::ICacheStore;

use crate::engine::StorageEngine;

pub struct SqliteCache {
    engine: Arc<StorageEngine>,
}

impl SqliteCache {
    pub fn new(engine: Arc<StorageEngine>) -> Self {
        Self { engine }
    }
}

impl ICacheStore for SqliteCache {
    fn get(&self, key: &str) -> TidentResult<Option<String>> {
        self.engine.cache_get(key)
    }

    fn set(&self, key: &str, value: &str) -> TidentResult<()> {
        self.engine.cache_set(key, value)
    }

    fn delete(&self, key: &str) -> TidentResult<()> {
        self.engine.cache_delete(key)
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
