use tident_core::errors::{CacheError, TidentResult};
use tident_core::traits::ICacheStore;

/// Cache whose every operation fails, as if the backend were down.
#[derive(Debug, Default)]
pub struct FailingCache;

impl FailingCache {
    fn down<T>() -> TidentResult<T> {
        Err(CacheError::Unavailable {
            backend: "failing".to_string(),
            reason: "connection refused".to_string(),
        }
        .into())
    }
}

impl ICacheStore for FailingCache {
    fn get(&self, _key: &str) -> TidentResult<Option<String>> {
        Self::down()
    }

    fn set(&self, _key: &str, _value: &str) -> TidentResult<()> {
        Self::down()
    }

    fn delete(&self, _key: &str) -> TidentResult<()> {
        Self::down()
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Cache that answers every read with undecodable content and drops writes.
#[derive(Debug, Default)]
pub struct CorruptCache;

impl ICacheStore for CorruptCache {
    fn get(&self, _key: &str) -> TidentResult<Option<String>> {
        Ok(Some("{not json".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> TidentResult<()> {
        Ok(())
    }

    fn delete(&self, _key: &str) -> TidentResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "corrupt"
    }
}
