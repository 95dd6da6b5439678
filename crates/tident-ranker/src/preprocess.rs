//! Query normalization ahead of identification.
//!
//! Lowercases, drops stop-words and non-alphabetic tokens, lemmatizes what
//! remains, and replaces pattern phrases with the `schema.table` names they
//! belong to. Without a provider the query is only trimmed and lowercased.

use tracing::{debug, warn};

use tident_core::models::NlpToken;
use tident_core::traits::INlpProvider;
use tident_core::TableId;
use tident_patterns::TablePatterns;

/// One pattern flattened to words, with its owning table.
struct Phrase<'a> {
    table: &'a TableId,
    words: Vec<&'a str>,
}

fn phrases(patterns: &TablePatterns) -> Vec<Phrase<'_>> {
    patterns
        .iter()
        .flat_map(|(table, list)| {
            list.iter().map(move |pattern| Phrase {
                table,
                words: pattern
                    .tokens()
                    .iter()
                    .flat_map(|t| t.split_whitespace())
                    .collect(),
            })
        })
        .filter(|phrase| !phrase.words.is_empty())
        .collect()
}

fn word_matches(token: &NlpToken, word: &str) -> bool {
    token.text.eq_ignore_ascii_case(word) || token.lemma.eq_ignore_ascii_case(word)
}

fn phrase_at(tokens: &[NlpToken], start: usize, phrase: &Phrase<'_>) -> bool {
    let end = start + phrase.words.len();
    end <= tokens.len()
        && tokens[start..end]
            .iter()
            .zip(&phrase.words)
            .all(|(token, word)| word_matches(token, word))
}

pub fn preprocess_query(query: &str, nlp: &dyn INlpProvider, patterns: &TablePatterns) -> String {
    let lowered = query.trim().to_lowercase();
    if !nlp.is_available() {
        return lowered;
    }
    let tokens = match nlp.tokenize(&lowered) {
        Ok(tokens) => tokens,
        Err(e) => {
            warn!(error = %e, "tokenize failed, using lowercased query");
            return lowered;
        }
    };

    let phrases = phrases(patterns);
    let mut out: Vec<String> = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        // Every table whose phrase starts here; the longest phrase sets the skip.
        let mut span = 0;
        let mut tables: Vec<&TableId> = Vec::new();
        for phrase in phrases.iter().filter(|p| phrase_at(&tokens, i, p)) {
            span = span.max(phrase.words.len());
            if !tables.contains(&phrase.table) {
                tables.push(phrase.table);
            }
        }
        if span > 0 {
            out.extend(tables.into_iter().map(TableId::to_string));
            i += span;
            continue;
        }
        let token = &tokens[i];
        if token.is_content() {
            out.push(token.lemma.to_lowercase());
        }
        i += 1;
    }

    let preprocessed = out.join(" ");
    debug!(query, preprocessed = %preprocessed, "query preprocessed");
    preprocessed
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::{small_catalog, StubNlpProvider};
    use tident_patterns::build_patterns;

    #[test]
    fn phrases_become_table_names() {
        let patterns = build_patterns(&small_catalog());
        let nlp = StubNlpProvider::new();
        assert_eq!(
            preprocess_query("Show the customer names, please", &nlp, &patterns),
            "show sales.customers"
        );
    }

    #[test]
    fn schema_word_names_every_table_in_it() {
        let patterns = build_patterns(&small_catalog());
        let nlp = StubNlpProvider::new();
        assert_eq!(
            preprocess_query("sales report", &nlp, &patterns),
            "sales.customers sales.orders report"
        );
    }

    #[test]
    fn unmatched_words_are_lemmatized_without_stop_words() {
        let patterns = build_patterns(&small_catalog());
        let nlp = StubNlpProvider::new();
        assert_eq!(
            preprocess_query("  What is the MONTHLY revenues in 2024 ", &nlp, &patterns),
            "monthly revenue"
        );
    }

    #[test]
    fn offline_provider_only_lowercases() {
        let patterns = build_patterns(&small_catalog());
        let nlp = StubNlpProvider::unavailable();
        assert_eq!(
            preprocess_query("  The Customer Names ", &nlp, &patterns),
            "the customer names"
        );
    }
}
