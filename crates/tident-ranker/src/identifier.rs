//! TableIdentifier: one catalog binding with its pattern, synonym, feedback,
//! corpus, and weight components, plus query history and degradation log.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use tracing::{debug, info, warn};

use tident_core::config::defaults::DEFAULT_FEEDBACK_WEIGHT;
use tident_core::errors::{TidentError, TidentResult};
use tident_core::models::{DegradationEvent, Identification, RankedQuery};
use tident_core::traits::{ICacheStore, IFeedbackStorage, INlpProvider, ITableScorer};
use tident_core::{Catalog, TableId, TidentConfig};

use tident_feedback::{FeedbackStore, HistoricalCorpus};
use tident_observability::tracing_setup::events;
use tident_observability::{
    feedback_span, identify_span, init_tracing_with_filter, rebuild_span, DegradationTracker,
    QueryLog, QueryLogEntry, TrackedDegradation,
};
use tident_patterns::{IntentMap, PatternIndex, TablePatterns};
use tident_storage::{MemoryCache, SqliteCache, StorageEngine, TieredCache};
use tident_synonyms::{SynonymIndex, SynonymSet};

use crate::fusion::{fuse, Signals};
use crate::gate::validate_query;
use crate::preprocess::preprocess_query;
use crate::weights::{WeightLedger, Weights};

const NLP_COMPONENT: &str = "nlp";

/// Everything derived from one catalog.
struct Binding {
    catalog_id: String,
    catalog: Arc<Catalog>,
    patterns: PatternIndex,
    synonyms: SynonymIndex,
    feedback: FeedbackStore,
    corpus: HistoricalCorpus,
    weights: WeightLedger,
}

/// Shared collaborators a binding is built from.
#[derive(Clone, Copy)]
struct Collaborators<'a> {
    nlp: &'a Arc<dyn INlpProvider>,
    cache: &'a Arc<dyn ICacheStore>,
    storage: &'a Arc<dyn IFeedbackStorage>,
    config: &'a TidentConfig,
}

impl Binding {
    fn load(catalog_id: &str, catalog: Arc<Catalog>, with: Collaborators<'_>) -> Self {
        let patterns = PatternIndex::load(
            catalog_id,
            catalog.clone(),
            with.nlp.clone(),
            with.cache.clone(),
        );
        let weights = WeightLedger::load(catalog_id, &catalog, with.cache.clone(), &with.config.weights);
        Self::assemble(catalog_id, catalog, patterns, weights, with)
    }

    fn rebuild(catalog_id: &str, catalog: Arc<Catalog>, with: Collaborators<'_>) -> Self {
        let patterns = PatternIndex::rebuild(
            catalog_id,
            catalog.clone(),
            with.nlp.clone(),
            with.cache.clone(),
        );
        let weights =
            WeightLedger::reset(catalog_id, &catalog, with.cache.clone(), &with.config.weights);
        Self::assemble(catalog_id, catalog, patterns, weights, with)
    }

    fn assemble(
        catalog_id: &str,
        catalog: Arc<Catalog>,
        patterns: PatternIndex,
        weights: WeightLedger,
        with: Collaborators<'_>,
    ) -> Self {
        for warning in catalog.validate() {
            warn!(catalog_id, %warning, "catalog inconsistency");
        }
        let synonyms = SynonymIndex::load(
            catalog_id,
            with.nlp.clone(),
            with.cache.clone(),
            &with.config.synonyms,
        );
        let feedback = FeedbackStore::new(
            catalog_id,
            with.storage.clone(),
            with.cache.clone(),
            with.nlp.clone(),
            &with.config.feedback,
        );
        let corpus = match &with.config.feedback.corpus_path {
            Some(path) => HistoricalCorpus::load(
                Path::new(path),
                with.config.feedback.corpus_similarity_threshold,
                with.nlp.clone(),
            ),
            None => HistoricalCorpus::empty(with.nlp.clone()),
        };
        Self {
            catalog_id: catalog_id.to_string(),
            catalog,
            patterns,
            synonyms,
            feedback,
            corpus,
            weights,
        }
    }

    fn feedback_tables(&self, query: &str) -> Vec<TableId> {
        let mut tables = self
            .feedback
            .get_similar_feedback(query)
            .map(|record| record.tables)
            .unwrap_or_default();
        for table in self.corpus.matching_tables(query) {
            if !tables.contains(&table) {
                tables.push(table);
            }
        }
        tables
    }
}

pub struct TableIdentifier {
    config: TidentConfig,
    nlp: Arc<dyn INlpProvider>,
    cache: Arc<dyn ICacheStore>,
    storage: Arc<dyn IFeedbackStorage>,
    binding: RwLock<Arc<Binding>>,
    history: Mutex<QueryLog>,
    degradations: Mutex<DegradationTracker>,
}

impl TableIdentifier {
    /// Bind a catalog, loading learned state from the cache and stores.
    pub fn bind(
        catalog: Catalog,
        catalog_id: &str,
        nlp: Arc<dyn INlpProvider>,
        cache: Arc<dyn ICacheStore>,
        storage: Arc<dyn IFeedbackStorage>,
        config: TidentConfig,
    ) -> Self {
        let binding = Binding::load(
            catalog_id,
            Arc::new(catalog),
            Collaborators {
                nlp: &nlp,
                cache: &cache,
                storage: &storage,
                config: &config,
            },
        );
        info!(catalog_id, tables = binding.catalog.len(), provider = nlp.name(), "catalog bound");
        let history = QueryLog::with_capacity(config.ranking.history_size);
        Self {
            config,
            nlp,
            cache,
            storage,
            binding: RwLock::new(Arc::new(binding)),
            history: Mutex::new(history),
            degradations: Mutex::new(DegradationTracker::new()),
        }
    }

    /// Bind a catalog against the configured stores: feedback rows and the
    /// durable cache tier in SQLite at `storage.db_path`, fronted by an
    /// in-process L1. Also installs JSON logging at
    /// `observability.log_level` unless a subscriber is already set.
    pub fn open(
        catalog: Catalog,
        catalog_id: &str,
        nlp: Arc<dyn INlpProvider>,
        config: TidentConfig,
    ) -> TidentResult<Self> {
        if !init_tracing_with_filter(&config.observability.log_level) {
            debug!("tracing subscriber already installed");
        }
        let engine = Arc::new(StorageEngine::open_with_config(
            Path::new(&config.storage.db_path),
            &config.storage,
        )?);
        let cache: Arc<dyn ICacheStore> = Arc::new(TieredCache::new(
            MemoryCache::new(&config.cache),
            Arc::new(SqliteCache::new(engine.clone())),
        ));
        let storage: Arc<dyn IFeedbackStorage> = engine;
        Ok(Self::bind(catalog, catalog_id, nlp, cache, storage, config))
    }

    fn current(&self) -> Arc<Binding> {
        self.binding.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Rank tables for a query. Empty tables mean "fall back to manual
    /// selection".
    pub fn identify(&self, query: &str) -> Identification {
        let binding = self.current();
        let span = identify_span!(binding.catalog_id, query);
        let _guard = span.enter();
        self.track_provider();

        let (pattern_tables, (name_scores, feedback_tables)) = rayon::join(
            || binding.patterns.match_query(query),
            || {
                rayon::join(
                    || binding.synonyms.get_matches(query),
                    || binding.feedback_tables(query),
                )
            },
        );
        debug!(
            patterns = pattern_tables.len(),
            names = name_scores.len(),
            feedback = feedback_tables.len(),
            "signals gathered"
        );

        let signals = Signals {
            pattern_tables,
            name_scores,
            feedback_tables,
        };
        let result = fuse(&signals, &self.config.ranking, |table| binding.weights.get(table));
        if result.is_empty() {
            warn!(query, "no tables identified");
        } else {
            events::tables_identified(query, result.tables.len(), result.confidence);
        }
        result
    }

    /// Retry while nothing matched and the provider reports unavailable.
    /// `attempts` is clamped to `[1, ranking.max_attempts]`.
    pub fn identify_with_retry(&self, query: &str, attempts: u32) -> Identification {
        let attempts = attempts.clamp(1, self.config.ranking.max_attempts.max(1));
        let mut attempt = 1;
        loop {
            let result = self.identify(query);
            if !result.is_empty() || self.nlp.is_available() || attempt >= attempts {
                return result;
            }
            debug!(attempt, attempts, "nlp unavailable and nothing matched, retrying");
            attempt += 1;
        }
    }

    /// Gate the query, normalize it, identify, and record the raw query in
    /// the recent-query history.
    pub fn process_query(&self, query: &str) -> Identification {
        let started = Instant::now();
        let result = match validate_query(query, self.nlp.as_ref()) {
            Ok(()) => {
                let patterns = self.current().patterns.patterns();
                let preprocessed = preprocess_query(query, self.nlp.as_ref(), &patterns);
                self.identify_with_retry(&preprocessed, self.config.ranking.max_attempts)
            }
            Err(rejection) => {
                events::query_rejected(query, &rejection.to_string());
                Identification::empty()
            }
        };
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(QueryLogEntry::new(
                query,
                result.tables.len(),
                result.confidence,
                started.elapsed(),
            ));
        result
    }

    /// Newest first.
    pub fn recent_queries(&self, limit: usize) -> Vec<QueryLogEntry> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recent(limit)
    }

    /// Learn from the tables a user confirmed for a query. Unknown names
    /// are dropped; returns the accepted tables.
    pub fn confirm<S: AsRef<str>>(&self, query: &str, tables: &[S]) -> Vec<TableId> {
        let binding = self.current();
        let span = feedback_span!(binding.catalog_id, "confirm");
        let _guard = span.enter();

        let (accepted, rejected) = binding.catalog.resolve_tables(tables);
        if !rejected.is_empty() {
            warn!(?rejected, "ignoring tables not in catalog");
        }
        if accepted.is_empty() {
            warn!(query, "no valid tables to learn from");
            return accepted;
        }

        binding.feedback.store_feedback(query, &accepted, DEFAULT_FEEDBACK_WEIGHT);
        binding.weights.adjust(&accepted, &binding.catalog.all_tables());
        binding.synonyms.update_matches(query, &accepted);
        binding.patterns.update(query, &accepted);
        events::feedback_recorded(query, accepted.len());
        accepted
    }

    /// Learn from a corrected table list. Same effect as [`Self::confirm`].
    pub fn update<S: AsRef<str>>(&self, query: &str, tables: &[S]) -> Vec<TableId> {
        self.confirm(query, tables)
    }

    pub fn export_feedback(&self, path: &Path) -> TidentResult<usize> {
        self.current().feedback.export(path)
    }

    pub fn import_feedback(&self, path: &Path) -> TidentResult<usize> {
        self.current().feedback.import(path)
    }

    pub fn clear_feedback(&self) {
        self.current().feedback.clear_feedback();
    }

    /// `None` takes `feedback.top_queries_limit`.
    pub fn top_queries(&self, limit: Option<usize>) -> Vec<RankedQuery> {
        self.current().feedback.get_top_queries(limit)
    }

    pub fn query_count(&self, query: &str) -> u64 {
        self.current().feedback.get_query_count(query)
    }

    /// Swap in a new catalog under the same id. Patterns, intents and
    /// weights are rebuilt; synonyms and feedback are re-read.
    pub fn rebuild(&self, catalog: Catalog) {
        let catalog_id = self.catalog_id();
        let span = rebuild_span!(catalog_id, catalog.len());
        let _guard = span.enter();

        let binding = Binding::rebuild(
            &catalog_id,
            Arc::new(catalog),
            Collaborators {
                nlp: &self.nlp,
                cache: &self.cache,
                storage: &self.storage,
                config: &self.config,
            },
        );
        *self.binding.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(binding);
        info!(catalog_id, "catalog rebuilt");
    }

    /// `CREATE TABLE` statements for the named tables, blank-line separated.
    pub fn ddl<S: AsRef<str>>(&self, tables: &[S]) -> TidentResult<String> {
        let binding = self.current();
        let (accepted, rejected) = binding.catalog.resolve_tables(tables);
        if let Some(name) = rejected.into_iter().next() {
            return Err(TidentError::TableNotFound { table: name });
        }
        let statements = accepted
            .iter()
            .map(|table| binding.catalog.ddl(table))
            .collect::<TidentResult<Vec<String>>>()?;
        Ok(statements.join("\n\n"))
    }

    pub fn export_model(&self, path: &Path) -> TidentResult<()> {
        self.current().weights.export_model(path)
    }

    fn track_provider(&self) {
        let mut tracker = self
            .degradations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let available = self.nlp.is_available();
        if !available && !tracker.is_degraded(NLP_COMPONENT) {
            tracker.record(DegradationEvent::now(
                NLP_COMPONENT,
                format!("{} unavailable", self.nlp.name()),
                "substring matching",
            ));
        } else if available {
            tracker.mark_recovered(NLP_COMPONENT);
        }
    }

    // --- Accessors ---

    pub fn catalog_id(&self) -> String {
        self.current().catalog_id.clone()
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        self.current().catalog.clone()
    }

    pub fn weights(&self) -> Weights {
        self.current().weights.snapshot()
    }

    pub fn patterns(&self) -> TablePatterns {
        self.current().patterns.patterns()
    }

    pub fn intents(&self) -> IntentMap {
        self.current().patterns.intents()
    }

    pub fn synonyms(&self) -> SynonymSet {
        self.current().synonyms.synonyms()
    }

    pub fn degradations(&self) -> Vec<TrackedDegradation> {
        self.degradations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .events()
            .to_vec()
    }

    pub fn config(&self) -> &TidentConfig {
        &self.config
    }
}

impl ITableScorer for TableIdentifier {
    fn score(&self, query: &str) -> TidentResult<Identification> {
        Ok(self.identify(query))
    }

    fn name(&self) -> &str {
        "tident"
    }
}
