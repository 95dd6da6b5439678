use crate::errors::{NlpError, TidentResult};
use crate::models::{Entity, NlpToken};

/// Tokenization, lemmatization, similarity and entity recognition.
///
/// Injected into every component that reads query text. Callers check
/// [`INlpProvider::is_available`] first and degrade when it is `false` or
/// when a call returns an error.
pub trait INlpProvider: Send + Sync {
    fn tokenize(&self, text: &str) -> TidentResult<Vec<NlpToken>>;

    /// Semantic similarity in `[0, 1]`.
    fn similarity(&self, a: &str, b: &str) -> TidentResult<f64>;

    /// ISO language code of the text, e.g. `"en"`.
    fn language_code(&self, text: &str) -> TidentResult<String>;

    fn entities(&self, text: &str) -> TidentResult<Vec<Entity>>;

    fn name(&self) -> &str;

    fn is_available(&self) -> bool;
}

/// Provider used when no NLP backend is configured. Always unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNlpProvider;

impl NoOpNlpProvider {
    fn unavailable<T>() -> TidentResult<T> {
        Err(NlpError::ProviderUnavailable {
            provider: "noop".to_string(),
        }
        .into())
    }
}

impl INlpProvider for NoOpNlpProvider {
    fn tokenize(&self, _text: &str) -> TidentResult<Vec<NlpToken>> {
        Self::unavailable()
    }

    fn similarity(&self, _a: &str, _b: &str) -> TidentResult<f64> {
        Self::unavailable()
    }

    fn language_code(&self, _text: &str) -> TidentResult<String> {
        Self::unavailable()
    }

    fn entities(&self, _text: &str) -> TidentResult<Vec<Entity>> {
        Self::unavailable()
    }

    fn name(&self) -> &str {
        "noop"
    }

    fn is_available(&self) -> bool {
        false
    }
}
