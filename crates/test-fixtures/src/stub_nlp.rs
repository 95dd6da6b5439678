//! Deterministic stand-in for a real NLP backend.
//!
//! Whitespace tokenizer, fixed stop-word list, suffix-stripping lemmas, and
//! Jaccard similarity over content lemmas. Every behavior can be overridden
//! per word or per pair so tests can pin exact scores.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use tident_core::errors::{NlpError, TidentResult};
use tident_core::models::{Entity, EntityLabel, NlpToken};
use tident_core::traits::INlpProvider;

const STOP_WORDS: &[&str] = &[
    "a", "all", "an", "and", "are", "at", "be", "by", "do", "does", "for", "from", "how", "i",
    "in", "is", "it", "me", "my", "of", "on", "or", "please", "that", "the", "this", "to",
    "what", "which", "who", "with", "you",
];

pub struct StubNlpProvider {
    available: AtomicBool,
    language: String,
    lemmas: HashMap<String, String>,
    similarities: HashMap<(String, String), f64>,
    entities: Vec<(String, String)>,
}

impl Default for StubNlpProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StubNlpProvider {
    pub fn new() -> Self {
        Self {
            available: AtomicBool::new(true),
            language: "en".to_string(),
            lemmas: HashMap::new(),
            similarities: HashMap::new(),
            entities: Vec::new(),
        }
    }

    /// A provider that reports unavailable and fails every call.
    pub fn unavailable() -> Self {
        let stub = Self::new();
        stub.set_available(false);
        stub
    }

    pub fn with_lemma(mut self, word: &str, lemma: &str) -> Self {
        self.lemmas.insert(word.to_lowercase(), lemma.to_lowercase());
        self
    }

    /// Pin the similarity of a pair (symmetric).
    pub fn with_similarity(mut self, a: &str, b: &str, score: f64) -> Self {
        self.similarities
            .insert(Self::pair_key(a, b), score.clamp(0.0, 1.0));
        self
    }

    /// Emit an entity with `label` whenever the text contains `trigger`.
    pub fn with_entity(mut self, trigger: &str, label: &str) -> Self {
        self.entities
            .push((trigger.to_lowercase(), label.to_string()));
        self
    }

    pub fn with_language(mut self, code: &str) -> Self {
        self.language = code.to_string();
        self
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn pair_key(a: &str, b: &str) -> (String, String) {
        let (a, b) = (a.trim().to_lowercase(), b.trim().to_lowercase());
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn check(&self) -> TidentResult<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(NlpError::ProviderUnavailable {
                provider: "stub".to_string(),
            }
            .into())
        }
    }

    fn lemma_of(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if let Some(lemma) = self.lemmas.get(&lower) {
            return lemma.clone();
        }
        if lower.len() > 4 && lower.ends_with("ies") {
            return format!("{}y", &lower[..lower.len() - 3]);
        }
        if lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss") {
            return lower[..lower.len() - 1].to_string();
        }
        lower
    }

    fn split(&self, text: &str) -> Vec<NlpToken> {
        text.split_whitespace()
            .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '_' && c != '+'))
            .filter(|piece| !piece.is_empty())
            .map(|piece| NlpToken {
                text: piece.to_string(),
                lemma: self.lemma_of(piece),
                is_stop: STOP_WORDS.contains(&piece.to_lowercase().as_str()),
                is_alpha: piece.chars().all(char::is_alphabetic),
            })
            .collect()
    }

    fn content_lemma_set(&self, text: &str) -> BTreeSet<String> {
        self.split(text)
            .into_iter()
            .filter(NlpToken::is_content)
            .map(|t| t.lemma)
            .collect()
    }
}

impl INlpProvider for StubNlpProvider {
    fn tokenize(&self, text: &str) -> TidentResult<Vec<NlpToken>> {
        self.check()?;
        Ok(self.split(text))
    }

    fn similarity(&self, a: &str, b: &str) -> TidentResult<f64> {
        self.check()?;
        let key = Self::pair_key(a, b);
        if key.0 == key.1 {
            return Ok(1.0);
        }
        if let Some(score) = self.similarities.get(&key) {
            return Ok(*score);
        }
        let left = self.content_lemma_set(a);
        let right = self.content_lemma_set(b);
        if left.is_empty() || right.is_empty() {
            return Ok(0.0);
        }
        let shared = left.intersection(&right).count() as f64;
        let union = left.union(&right).count() as f64;
        Ok(shared / union)
    }

    fn language_code(&self, _text: &str) -> TidentResult<String> {
        self.check()?;
        Ok(self.language.clone())
    }

    fn entities(&self, text: &str) -> TidentResult<Vec<Entity>> {
        self.check()?;
        let lower = text.to_lowercase();
        Ok(self
            .entities
            .iter()
            .filter(|(trigger, _)| lower.contains(trigger.as_str()))
            .map(|(trigger, label)| Entity {
                label: EntityLabel::from_label(label),
                text: trigger.clone(),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}
