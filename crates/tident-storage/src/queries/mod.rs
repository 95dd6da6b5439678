pub mod cache_ops;
pub mod count_ops;
pub mod feedback_ops;
