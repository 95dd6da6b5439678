//! L1 in-process cache using moka.
//!
//! TinyLFU admission, bounded entry count, per-entry TTL.

use std::time::Duration;

use moka::sync::Cache;

use tident_core::config::CacheConfig;
use tident_core::errors::TidentResult;
use tident_core::traits::ICacheStore;

pub struct MemoryCache {
    cache: Cache<String, String>,
}

impl MemoryCache {
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.l1_max_entries)
            .time_to_live(Duration::from_secs(config.l1_ttl_secs))
            .build();
        Self { cache }
    }

    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl ICacheStore for MemoryCache {
    fn get(&self, key: &str) -> TidentResult<Option<String>> {
        Ok(self.cache.get(key))
    }

    fn set(&self, key: &str, value: &str) -> TidentResult<()> {
        self.cache.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> TidentResult<()> {
        self.cache.invalidate(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
