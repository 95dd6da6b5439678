/// Fast-cache errors. Callers treat every variant as a cache miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache backend {backend} unavailable: {reason}")]
    Unavailable { backend: String, reason: String },
}
