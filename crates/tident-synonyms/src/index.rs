//! SynonymIndex: learned per-table synonyms plus the memoized match graph
//! for one catalog binding.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, error, warn};

use tident_core::config::SynonymConfig;
use tident_core::errors::TidentResult;
use tident_core::models::{cache_key, content_lemmas, Artifact};
use tident_core::traits::{ICacheStore, INlpProvider};
use tident_core::TableId;

use tident_storage::cache::{read_json, write_json, CacheRead};

use crate::file::{load_synonyms, save_synonyms, synonyms_path, SynonymSet};
use crate::graph::MatchGraph;

#[derive(Debug, Clone, Default)]
struct SynonymState {
    synonyms: SynonymSet,
    graph: MatchGraph,
}

pub struct SynonymIndex {
    catalog_id: String,
    file_path: PathBuf,
    literal_hit_score: f64,
    similarity_threshold: f64,
    nlp: Arc<dyn INlpProvider>,
    cache: Arc<dyn ICacheStore>,
    state: RwLock<SynonymState>,
}

impl SynonymIndex {
    /// Read the synonym file and the match graph. Anything missing or
    /// unreadable starts empty.
    pub fn load(
        catalog_id: &str,
        nlp: Arc<dyn INlpProvider>,
        cache: Arc<dyn ICacheStore>,
        config: &SynonymConfig,
    ) -> Self {
        let file_path = synonyms_path(Path::new(&config.data_dir), catalog_id);
        let synonyms = load_synonyms(&file_path);
        let graph = match read_json::<MatchGraph>(
            cache.as_ref(),
            &cache_key(catalog_id, Artifact::NameMatches),
        ) {
            CacheRead::Hit(graph) => graph,
            CacheRead::Miss | CacheRead::Unavailable => {
                debug!(catalog_id, "no match graph, starting cold");
                MatchGraph::new()
            }
        };

        Self {
            catalog_id: catalog_id.to_string(),
            file_path,
            literal_hit_score: config.literal_hit_score,
            similarity_threshold: config.similarity_threshold,
            nlp,
            cache,
            state: RwLock::new(SynonymState { synonyms, graph }),
        }
    }

    /// Score every table whose synonyms relate to the query. Literal and
    /// memoized hits accumulate; similarity hits only raise the score.
    /// Empty when the provider is unavailable or fails.
    pub fn get_matches(&self, query: &str) -> BTreeMap<TableId, f64> {
        if !self.nlp.is_available() {
            warn!(provider = self.nlp.name(), "nlp unavailable, no synonym matches");
            return BTreeMap::new();
        }
        match self.score_query(query) {
            Ok(scores) => {
                debug!(query, matched = scores.len(), "synonym match");
                scores
            }
            Err(e) => {
                warn!(error = %e, "synonym matching failed");
                BTreeMap::new()
            }
        }
    }

    fn score_query(&self, query: &str) -> TidentResult<BTreeMap<TableId, f64>> {
        let lemmas = content_lemmas(&self.nlp.tokenize(&query.to_lowercase())?);
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let mut scores: BTreeMap<TableId, f64> = BTreeMap::new();

        for (table, synonyms) in &state.synonyms {
            for synonym in synonyms {
                // A memoized association counts even when the synonym itself
                // is absent from the query.
                let hit = if lemmas.contains(synonym) {
                    Some(self.literal_hit_score)
                } else {
                    state.graph.score(synonym, table)
                };
                if let Some(hit) = hit {
                    *scores.entry(table.clone()).or_insert(0.0) += hit;
                }
            }
        }

        for lemma in &lemmas {
            for (table, synonyms) in &state.synonyms {
                for synonym in synonyms {
                    let similarity = self.nlp.similarity(lemma, synonym)?;
                    if similarity > self.similarity_threshold {
                        let score = scores.entry(table.clone()).or_insert(0.0);
                        *score = score.max(similarity);
                    }
                }
            }
        }
        Ok(scores)
    }

    /// Learn the query's lemmas as synonyms of each confirmed table.
    pub fn update_matches(&self, query: &str, tables: &[TableId]) {
        if !self.nlp.is_available() {
            warn!(provider = self.nlp.name(), "nlp unavailable, skipping synonym update");
            return;
        }
        let lemmas = match self.nlp.tokenize(&query.to_lowercase()) {
            Ok(tokens) => content_lemmas(&tokens),
            Err(e) => {
                warn!(error = %e, "tokenize failed, skipping synonym update");
                return;
            }
        };

        let snapshot = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            for table in tables {
                for lemma in &lemmas {
                    let synonyms = state.synonyms.entry(table.clone()).or_default();
                    if !synonyms.contains(lemma) {
                        synonyms.push(lemma.clone());
                        debug!(table = %table, lemma = %lemma, "learned synonym");
                    }
                    state.graph.record(lemma, table, self.literal_hit_score);
                }
            }
            state.clone()
        };

        if let Err(e) = save_synonyms(&self.file_path, &snapshot.synonyms) {
            error!(path = %self.file_path.display(), error = %e, "failed to persist synonyms");
        }
        write_json(
            self.cache.as_ref(),
            &cache_key(&self.catalog_id, Artifact::NameMatches),
            &snapshot.graph,
        );
    }

    pub fn synonyms(&self) -> SynonymSet {
        self.state.read().unwrap_or_else(PoisonError::into_inner).synonyms.clone()
    }

    pub fn match_graph(&self) -> MatchGraph {
        self.state.read().unwrap_or_else(PoisonError::into_inner).graph.clone()
    }

    pub fn catalog_id(&self) -> &str {
        &self.catalog_id
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}
