use crate::errors::TidentResult;

/// Best-effort key/value store for JSON artifacts under
/// `{catalog_id}:{artifact}` keys. Errors are treated as misses by callers.
pub trait ICacheStore: Send + Sync {
    fn get(&self, key: &str) -> TidentResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> TidentResult<()>;
    fn delete(&self, key: &str) -> TidentResult<()>;
    fn name(&self) -> &str;
}
