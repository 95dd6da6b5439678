//! Span definitions per operation: identify, feedback, rebuild.

/// Create an identify span.
#[macro_export]
macro_rules! identify_span {
    ($catalog_id:expr, $query:expr) => {
        tracing::info_span!("tident.identify", catalog_id = %$catalog_id, query = %$query)
    };
}

/// Create a feedback span.
#[macro_export]
macro_rules! feedback_span {
    ($catalog_id:expr, $operation:expr) => {
        tracing::info_span!("tident.feedback", catalog_id = %$catalog_id, operation = %$operation)
    };
}

/// Create a rebuild span.
#[macro_export]
macro_rules! rebuild_span {
    ($catalog_id:expr, $table_count:expr) => {
        tracing::info_span!("tident.rebuild", catalog_id = %$catalog_id, table_count = $table_count)
    };
}
