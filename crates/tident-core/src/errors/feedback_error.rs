/// Feedback import/export and historical corpus errors.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("feedback export to {path} failed: {reason}")]
    ExportFailed { path: String, reason: String },

    #[error("feedback import from {path} failed: {reason}")]
    ImportFailed { path: String, reason: String },

    #[error("malformed query corpus at {path}: {reason}")]
    MalformedCorpus { path: String, reason: String },
}
