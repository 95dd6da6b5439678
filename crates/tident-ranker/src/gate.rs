//! Query gate: reject input that cannot name tables before any lookup runs.

use tracing::warn;

use tident_core::constants::SUPPORTED_LANGUAGE;
use tident_core::models::content_lemmas;
use tident_core::traits::INlpProvider;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryRejection {
    #[error("query has at most one word")]
    SingleWord,

    #[error("query is only digits")]
    DigitsOnly,

    #[error("query starts with '+'")]
    LeadingPlus,

    #[error("query language '{language}' is not supported")]
    UnsupportedLanguage { language: String },

    #[error("query has no meaningful tokens")]
    NoContentTokens,
}

/// Lexical checks always apply; language and token checks only when the
/// provider is available.
pub fn validate_query(query: &str, nlp: &dyn INlpProvider) -> Result<(), QueryRejection> {
    let normalized = query.trim().to_lowercase();
    if normalized.starts_with('+') {
        return Err(QueryRejection::LeadingPlus);
    }
    // A single run of digits; "123 456" falls through to the later checks.
    if !normalized.is_empty() && normalized.chars().all(|c| c.is_ascii_digit()) {
        return Err(QueryRejection::DigitsOnly);
    }
    if normalized.split_whitespace().count() <= 1 {
        return Err(QueryRejection::SingleWord);
    }

    if !nlp.is_available() {
        warn!(provider = nlp.name(), "nlp unavailable, lexical query checks only");
        return Ok(());
    }
    match nlp.language_code(&normalized) {
        Ok(language) if language != SUPPORTED_LANGUAGE => {
            return Err(QueryRejection::UnsupportedLanguage { language });
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "language detection failed, skipping"),
    }
    match nlp.tokenize(&normalized) {
        Ok(tokens) if content_lemmas(&tokens).is_empty() => Err(QueryRejection::NoContentTokens),
        Ok(_) => Ok(()),
        Err(e) => {
            warn!(error = %e, "tokenize failed, skipping content check");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::StubNlpProvider;

    #[test]
    fn lexical_rejections() {
        let nlp = StubNlpProvider::new();
        assert_eq!(validate_query("customers", &nlp), Err(QueryRejection::SingleWord));
        assert_eq!(validate_query("   ", &nlp), Err(QueryRejection::SingleWord));
        assert_eq!(validate_query("123456", &nlp), Err(QueryRejection::DigitsOnly));
        assert_eq!(validate_query("  42  ", &nlp), Err(QueryRejection::DigitsOnly));
        assert_eq!(validate_query("+44 orders", &nlp), Err(QueryRejection::LeadingPlus));
    }

    #[test]
    fn provider_checks() {
        let nlp = StubNlpProvider::new().with_language("de");
        assert_eq!(
            validate_query("alle kunden zeigen", &nlp),
            Err(QueryRejection::UnsupportedLanguage { language: "de".into() })
        );
        let nlp = StubNlpProvider::new();
        assert_eq!(validate_query("what is it", &nlp), Err(QueryRejection::NoContentTokens));
        assert_eq!(validate_query("list customers by city", &nlp), Ok(()));
    }

    #[test]
    fn offline_provider_applies_lexical_checks_only() {
        let nlp = StubNlpProvider::unavailable();
        assert_eq!(validate_query("what is it", &nlp), Ok(()));
        assert_eq!(validate_query("orders", &nlp), Err(QueryRejection::SingleWord));
    }

    #[test]
    fn spaced_digit_groups_are_not_digits_only() {
        let offline = StubNlpProvider::unavailable();
        assert_eq!(validate_query("123 456", &offline), Ok(()));
        // Online, digits carry no content lemmas.
        let nlp = StubNlpProvider::new();
        assert_eq!(validate_query("123 456", &nlp), Err(QueryRejection::NoContentTokens));
    }
}
