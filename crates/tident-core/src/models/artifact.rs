use crate::constants::CACHE_KEY_SEPARATOR;

/// Cache-persisted artifacts of one catalog binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Patterns,
    Entities,
    NameMatches,
    Feedback,
    Weights,
}

impl Artifact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patterns => "patterns",
            Self::Entities => "entities",
            Self::NameMatches => "name_matches",
            Self::Feedback => "feedback",
            Self::Weights => "weights",
        }
    }
}

/// `{catalog_id}:{artifact}`.
pub fn cache_key(catalog_id: &str, artifact: Artifact) -> String {
    format!("{catalog_id}{CACHE_KEY_SEPARATOR}{}", artifact.as_str())
}
