/// NLP/similarity collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum NlpError {
    #[error("nlp provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("nlp processing failed: {reason}")]
    ProcessingFailed { reason: String },
}
