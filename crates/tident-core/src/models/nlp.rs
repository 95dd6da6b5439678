use serde::{Deserialize, Serialize};

/// One token as produced by the NLP provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NlpToken {
    pub text: String,
    pub lemma: String,
    pub is_stop: bool,
    pub is_alpha: bool,
}

impl NlpToken {
    /// Neither a stop-word nor non-alphabetic.
    pub fn is_content(&self) -> bool {
        !self.is_stop && self.is_alpha
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Date,
    /// Geopolitical entity: city, state, country.
    Gpe,
    Other(String),
}

impl EntityLabel {
    pub fn from_label(label: &str) -> Self {
        match label {
            "DATE" => Self::Date,
            "GPE" => Self::Gpe,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub label: EntityLabel,
    pub text: String,
}

/// Lemmas of the content tokens, in order.
pub fn content_lemmas(tokens: &[NlpToken]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.is_content())
        .map(|t| t.lemma.clone())
        .collect()
}
