//! L1 → L2 coordinator. Writes go through to both tiers; an L2 hit fills L1.

use std::sync::Arc;

use tracing::{debug, warn};

use tident_core::errors::TidentResult;
use tident_core::traits::ICacheStore;

use super::memory::MemoryCache;

pub struct TieredCache {
    l1: MemoryCache,
    l2: Arc<dyn ICacheStore>,
}

impl TieredCache {
    pub fn new(l1: MemoryCache, l2: Arc<dyn ICacheStore>) -> Self {
        Self { l1, l2 }
    }

    pub fn l1(&self) -> &MemoryCache {
        &self.l1
    }
}

impl ICacheStore for TieredCache {
    fn get(&self, key: &str) -> TidentResult<Option<String>> {
        if let Some(value) = self.l1.get(key)? {
            return Ok(Some(value));
        }
        let value = self.l2.get(key)?;
        if let Some(value) = &value {
            debug!(key, backend = self.l2.name(), "L2 hit, filling L1");
            self.l1.set(key, value)?;
        }
        Ok(value)
    }

    /// L1 is updated even when L2 fails; the L2 error is still returned.
    fn set(&self, key: &str, value: &str) -> TidentResult<()> {
        self.l1.set(key, value)?;
        self.l2.set(key, value).inspect_err(|e| {
            warn!(key, backend = self.l2.name(), error = %e, "L2 write failed");
        })
    }

    fn delete(&self, key: &str) -> TidentResult<()> {
        self.l1.delete(key)?;
        self.l2.delete(key)
    }

    fn name(&self) -> &str {
        "tiered"
    }
}
