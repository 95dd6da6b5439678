use std::collections::BTreeMap;

use crate::errors::TidentResult;
use crate::models::{FeedbackRecord, RankedQuery};

/// Durable feedback rows keyed by exact query text, plus usage counts.
pub trait IFeedbackStorage: Send + Sync {
    // --- Rows ---
    fn upsert_feedback(&self, record: &FeedbackRecord) -> TidentResult<()>;
    fn get_feedback(&self, query: &str) -> TidentResult<Option<FeedbackRecord>>;
    fn all_feedback(&self) -> TidentResult<Vec<FeedbackRecord>>;

    // --- Counts ---
    fn increment_count(&self, query: &str) -> TidentResult<u64>;
    fn query_count(&self, query: &str) -> TidentResult<u64>;
    fn set_count(&self, query: &str, count: u64) -> TidentResult<()>;
    fn all_counts(&self) -> TidentResult<BTreeMap<String, u64>>;

    // --- Aggregation ---
    /// Rows ordered by count desc, then weight desc.
    fn top_queries(&self, limit: usize) -> TidentResult<Vec<RankedQuery>>;

    // --- Bulk ---
    /// Upsert rows and overwrite counts. Backends with transactions should
    /// apply the batch atomically.
    fn import_batch(
        &self,
        records: &[FeedbackRecord],
        counts: &BTreeMap<String, u64>,
    ) -> TidentResult<()> {
        for record in records {
            self.upsert_feedback(record)?;
        }
        for (query, count) in counts {
            self.set_count(query, *count)?;
        }
        Ok(())
    }

    // --- Maintenance ---
    fn clear(&self) -> TidentResult<()>;
}
