//! PatternIndex: pattern table + intent map for one catalog binding,
//! persisted to the artifact cache.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, warn};

use tident_core::models::{cache_key, content_lemmas, Artifact, Pattern};
use tident_core::traits::{ICacheStore, INlpProvider};
use tident_core::{Catalog, Intent, TableId};

use tident_storage::cache::{read_json, write_json, CacheRead};

use crate::builder::{build_patterns, normalize_column, push_unique, TablePatterns};
use crate::intents::IntentMap;
use crate::matcher::{nlp_match, substring_match};

#[derive(Debug, Clone)]
struct PatternState {
    patterns: TablePatterns,
    intents: IntentMap,
}

pub struct PatternIndex {
    catalog_id: String,
    catalog: Arc<Catalog>,
    nlp: Arc<dyn INlpProvider>,
    cache: Arc<dyn ICacheStore>,
    state: RwLock<PatternState>,
}

impl PatternIndex {
    /// Load from the cache, building from the catalog where the cache has
    /// nothing usable.
    pub fn load(
        catalog_id: &str,
        catalog: Arc<Catalog>,
        nlp: Arc<dyn INlpProvider>,
        cache: Arc<dyn ICacheStore>,
    ) -> Self {
        let patterns_key = cache_key(catalog_id, Artifact::Patterns);
        let entities_key = cache_key(catalog_id, Artifact::Entities);

        let patterns = match read_json::<TablePatterns>(cache.as_ref(), &patterns_key) {
            CacheRead::Hit(patterns) => {
                debug!(catalog_id, tables = patterns.len(), "loaded patterns from cache");
                patterns
            }
            CacheRead::Miss | CacheRead::Unavailable => {
                let patterns = build_patterns(&catalog);
                write_json(cache.as_ref(), &patterns_key, &patterns);
                patterns
            }
        };

        let intents = match read_json::<IntentMap>(cache.as_ref(), &entities_key) {
            CacheRead::Hit(intents) => intents,
            CacheRead::Miss => {
                let intents = IntentMap::build(&catalog);
                write_json(cache.as_ref(), &entities_key, &intents);
                intents
            }
            CacheRead::Unavailable => {
                warn!(catalog_id, "intent map unavailable, using defaults");
                IntentMap::defaults()
            }
        };

        Self::with_state(catalog_id, catalog, nlp, cache, PatternState { patterns, intents })
    }

    /// Build from the catalog, ignoring and overwriting cached state.
    pub fn rebuild(
        catalog_id: &str,
        catalog: Arc<Catalog>,
        nlp: Arc<dyn INlpProvider>,
        cache: Arc<dyn ICacheStore>,
    ) -> Self {
        let state = PatternState {
            patterns: build_patterns(&catalog),
            intents: IntentMap::build(&catalog),
        };
        let index = Self::with_state(catalog_id, catalog, nlp, cache, state);
        index.persist();
        info!(catalog_id, "pattern index rebuilt");
        index
    }

    fn with_state(
        catalog_id: &str,
        catalog: Arc<Catalog>,
        nlp: Arc<dyn INlpProvider>,
        cache: Arc<dyn ICacheStore>,
        state: PatternState,
    ) -> Self {
        Self {
            catalog_id: catalog_id.to_string(),
            catalog,
            nlp,
            cache,
            state: RwLock::new(state),
        }
    }

    /// Tables whose patterns, entities, intents or direct foreign keys match.
    /// Degrades to substring matching when the provider is unavailable.
    pub fn match_query(&self, query: &str) -> Vec<TableId> {
        if !self.nlp.is_available() {
            warn!(provider = self.nlp.name(), "nlp unavailable, using substring matching");
            return substring_match(&self.catalog, query);
        }
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        match nlp_match(&self.catalog, &state.patterns, &state.intents, self.nlp.as_ref(), query) {
            Ok(tables) => {
                debug!(query, matched = tables.len(), "pattern match");
                tables
            }
            Err(e) => {
                warn!(error = %e, "pattern matching failed, using substring matching");
                substring_match(&self.catalog, query)
            }
        }
    }

    /// Learn from confirmed tables: add one-token patterns for lemmas that
    /// occur in a column name and extend intents the table's columns trigger.
    pub fn update(&self, query: &str, tables: &[TableId]) {
        if !self.nlp.is_available() {
            warn!(provider = self.nlp.name(), "nlp unavailable, skipping pattern update");
            return;
        }
        let lemmas = match self.nlp.tokenize(&query.to_lowercase()) {
            Ok(tokens) => content_lemmas(&tokens),
            Err(e) => {
                warn!(error = %e, "tokenize failed, skipping pattern update");
                return;
            }
        };

        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            for table in tables {
                let Some(info) = self.catalog.table(table) else {
                    warn!(table = %table, "not in catalog, skipping pattern update");
                    continue;
                };
                let columns: Vec<String> = info.columns.keys().map(|c| normalize_column(c)).collect();
                let triggered: Vec<Intent> = Intent::ALL
                    .into_iter()
                    .filter(|intent| intent.trigger_columns().iter().any(|c| info.has_column(c)))
                    .collect();

                for lemma in &lemmas {
                    if columns.iter().any(|c| c.contains(lemma.as_str())) {
                        let patterns = state.patterns.entry(table.clone()).or_default();
                        if push_unique(patterns, Pattern::single(lemma.as_str())) {
                            debug!(table = %table, lemma = %lemma, "added pattern");
                        }
                    }
                    for intent in &triggered {
                        if state.intents.add_keyword(*intent, lemma) {
                            debug!(intent = %intent, lemma = %lemma, "added intent keyword");
                        }
                    }
                }
            }
        }
        self.persist();
    }

    pub fn patterns(&self) -> TablePatterns {
        self.state.read().unwrap_or_else(PoisonError::into_inner).patterns.clone()
    }

    pub fn intents(&self) -> IntentMap {
        self.state.read().unwrap_or_else(PoisonError::into_inner).intents.clone()
    }

    pub fn catalog_id(&self) -> &str {
        &self.catalog_id
    }

    fn persist(&self) {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner).clone();
        write_json(
            self.cache.as_ref(),
            &cache_key(&self.catalog_id, Artifact::Patterns),
            &state.patterns,
        );
        write_json(
            self.cache.as_ref(),
            &cache_key(&self.catalog_id, Artifact::Entities),
            &state.intents,
        );
    }
}
