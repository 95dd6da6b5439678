use crate::errors::TidentResult;
use crate::models::Identification;

/// Anything that maps a query to ranked tables with a confidence.
pub trait ITableScorer: Send + Sync {
    fn score(&self, query: &str) -> TidentResult<Identification>;
    fn name(&self) -> &str;
}
