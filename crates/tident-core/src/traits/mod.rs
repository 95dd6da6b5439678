mod cache;
mod nlp;
mod scorer;
mod storage;

pub use cache::ICacheStore;
pub use nlp::{INlpProvider, NoOpNlpProvider};
pub use scorer::ITableScorer;
pub use storage::IFeedbackStorage;
