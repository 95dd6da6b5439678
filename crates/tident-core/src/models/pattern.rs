use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Ordered sequence of lowercase literal tokens that indicates a table.
///
/// A token may itself contain spaces (column names with underscores
/// normalized), in which case it only ever matches as a substring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern(Vec<String>);

impl Pattern {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(|t| t.into().to_lowercase()).collect())
    }

    pub fn single(token: impl Into<String>) -> Self {
        Self::new([token.into()])
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Tokens joined by a single space.
    pub fn phrase(&self) -> String {
        self.0.join(" ")
    }

    pub fn distinct_tokens(&self) -> BTreeSet<&str> {
        self.0.iter().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
