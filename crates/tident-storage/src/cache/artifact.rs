//! JSON artifact helpers over any `ICacheStore`. Failures are logged,
//! never propagated.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, warn};

use tident_core::errors::TidentError;
use tident_core::traits::ICacheStore;

/// Outcome of reading one artifact.
#[derive(Debug)]
pub enum CacheRead<T> {
    Hit(T),
    /// Absent or undecodable.
    Miss,
    /// The cache backend failed.
    Unavailable,
}

pub fn read_json<T: DeserializeOwned>(cache: &dyn ICacheStore, key: &str) -> CacheRead<T> {
    match cache.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => CacheRead::Hit(value),
            Err(e) => {
                warn!(key, error = %e, "malformed cache entry, treating as absent");
                CacheRead::Miss
            }
        },
        Ok(None) => CacheRead::Miss,
        Err(e) => {
            error!(key, backend = cache.name(), error = %e, "cache read failed");
            CacheRead::Unavailable
        }
    }
}

/// Returns whether the write succeeded.
pub fn write_json<T: Serialize + ?Sized>(cache: &dyn ICacheStore, key: &str, value: &T) -> bool {
    let result = serde_json::to_string(value)
        .map_err(TidentError::from)
        .and_then(|raw| cache.set(key, &raw));
    match result {
        Ok(()) => true,
        Err(e) => {
            error!(key, backend = cache.name(), error = %e, "cache write failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::cache::MemoryCache;

    #[test]
    fn malformed_entry_is_a_miss() {
        let cache = MemoryCache::default();
        cache.set("k", "{oops").unwrap();
        assert!(matches!(read_json::<BTreeMap<String, f64>>(&cache, "k"), CacheRead::Miss));
    }

    #[test]
    fn written_value_reads_back() {
        let cache = MemoryCache::default();
        let weights = BTreeMap::from([("a.b".to_string(), 1.3)]);
        assert!(write_json(&cache, "k", &weights));
        match read_json::<BTreeMap<String, f64>>(&cache, "k") {
            CacheRead::Hit(value) => assert_eq!(value, weights),
            other => panic!("expected hit, got {other:?}"),
        }
    }
}
