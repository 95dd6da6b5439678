//! Structured log events for key operations.

pub fn tables_identified(query: &str, table_count: usize, confidence: f64) {
    tracing::info!(
        event = "tables_identified",
        query = %query,
        table_count = table_count,
        confidence = confidence,
        "tables identified"
    );
}

pub fn query_rejected(query: &str, reason: &str) {
    tracing::warn!(
        event = "query_rejected",
        query = %query,
        reason = %reason,
        "query rejected"
    );
}

pub fn feedback_recorded(query: &str, table_count: usize) {
    tracing::info!(
        event = "feedback_recorded",
        query = %query,
        table_count = table_count,
        "feedback recorded"
    );
}

pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}
