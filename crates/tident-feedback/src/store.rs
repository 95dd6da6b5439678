//! FeedbackStore: durable rows via `IFeedbackStorage`, mirrored into the
//! artifact cache under `{catalog_id}:feedback` for fast similarity scans.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use tident_core::config::FeedbackConfig;
use tident_core::errors::{FeedbackError, TidentResult};
use tident_core::models::{cache_key, Artifact, FeedbackExport, FeedbackRecord, RankedQuery};
use tident_core::traits::{ICacheStore, IFeedbackStorage, INlpProvider};
use tident_core::TableId;

use tident_storage::cache::{read_json, write_json, CacheRead};

pub struct FeedbackStore {
    mirror_key: String,
    similarity_threshold: f64,
    top_queries_limit: usize,
    storage: Arc<dyn IFeedbackStorage>,
    cache: Arc<dyn ICacheStore>,
    nlp: Arc<dyn INlpProvider>,
}

impl FeedbackStore {
    pub fn new(
        catalog_id: &str,
        storage: Arc<dyn IFeedbackStorage>,
        cache: Arc<dyn ICacheStore>,
        nlp: Arc<dyn INlpProvider>,
        config: &FeedbackConfig,
    ) -> Self {
        Self {
            mirror_key: cache_key(catalog_id, Artifact::Feedback),
            similarity_threshold: config.similarity_threshold,
            top_queries_limit: config.top_queries_limit,
            storage,
            cache,
            nlp,
        }
    }

    /// The single most similar stored query above the threshold, looked up
    /// in the cache mirror first and the durable rows second.
    pub fn get_similar_feedback(&self, query: &str) -> Option<FeedbackRecord> {
        if !self.nlp.is_available() {
            warn!(provider = self.nlp.name(), "nlp unavailable, skipping feedback lookup");
            return None;
        }

        let mirror = self.read_mirror();
        match self.best_match(query, &mirror) {
            Ok(Some(record)) => {
                debug!(query, matched = %record.query, "similar feedback in cache");
                return Some(record);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "feedback similarity failed");
                return None;
            }
        }

        let rows = match self.storage.all_feedback() {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, "failed to read feedback rows");
                return None;
            }
        };
        match self.best_match(query, &rows) {
            Ok(Some(record)) => {
                debug!(query, matched = %record.query, "similar feedback in storage");
                write_json(self.cache.as_ref(), &self.mirror_key, &[record.clone()]);
                Some(record)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "feedback similarity failed");
                None
            }
        }
    }

    fn best_match(
        &self,
        query: &str,
        candidates: &[FeedbackRecord],
    ) -> TidentResult<Option<FeedbackRecord>> {
        let query = query.to_lowercase();
        let mut best: Option<(f64, &FeedbackRecord)> = None;
        for candidate in candidates {
            let similarity = self.nlp.similarity(&query, &candidate.query.to_lowercase())?;
            if similarity > self.similarity_threshold
                && best.map_or(true, |(score, _)| similarity > score)
            {
                best = Some((similarity, candidate));
            }
        }
        Ok(best.map(|(_, record)| record.clone()))
    }

    /// Persist a confirmed mapping, bump its usage count, and append it to
    /// the cache mirror. Storage failures are logged.
    pub fn store_feedback(&self, query: &str, tables: &[TableId], weight: f64) {
        let record = FeedbackRecord::new(query, tables.to_vec(), weight);
        if let Err(e) = self.storage.upsert_feedback(&record) {
            error!(query, error = %e, "failed to store feedback");
            return;
        }
        match self.storage.increment_count(query) {
            Ok(count) => debug!(query, count, "feedback stored"),
            Err(e) => error!(query, error = %e, "failed to increment query count"),
        }

        // The mirror grows without bound and keeps duplicates.
        let mut mirror = self.read_mirror();
        mirror.push(record);
        write_json(self.cache.as_ref(), &self.mirror_key, &mirror);
    }

    pub fn get_query_count(&self, query: &str) -> u64 {
        self.storage.query_count(query).unwrap_or_else(|e| {
            error!(query, error = %e, "failed to read query count");
            0
        })
    }

    /// Stored queries ordered by usage count, then weight. `None` takes the
    /// configured `top_queries_limit`.
    pub fn get_top_queries(&self, limit: Option<usize>) -> Vec<RankedQuery> {
        let limit = limit.unwrap_or(self.top_queries_limit);
        self.storage.top_queries(limit).unwrap_or_else(|e| {
            error!(error = %e, "failed to read top queries");
            Vec::new()
        })
    }

    /// Write every row and count to `path` as pretty JSON.
    pub fn export(&self, path: &Path) -> TidentResult<usize> {
        let export_failed = |reason: String| FeedbackError::ExportFailed {
            path: path.display().to_string(),
            reason,
        };
        let document = FeedbackExport {
            feedback: self.storage.all_feedback()?,
            query_counts: self.storage.all_counts()?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| export_failed(e.to_string()))?;
        }
        let raw = serde_json::to_string_pretty(&document)?;
        std::fs::write(path, raw).map_err(|e| export_failed(e.to_string()))?;
        info!(path = %path.display(), rows = document.feedback.len(), "exported feedback");
        Ok(document.feedback.len())
    }

    /// Merge an exported document into storage and replace the cache mirror
    /// with the imported rows. A missing file imports nothing.
    pub fn import(&self, path: &Path) -> TidentResult<usize> {
        let import_failed = |reason: String| FeedbackError::ImportFailed {
            path: path.display().to_string(),
            reason,
        };
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "import file not found");
                return Ok(0);
            }
            Err(e) => return Err(import_failed(e.to_string()).into()),
        };
        let document: FeedbackExport =
            serde_json::from_str(&raw).map_err(|e| import_failed(e.to_string()))?;

        let (usable, skipped): (Vec<FeedbackRecord>, Vec<FeedbackRecord>) =
            document.feedback.into_iter().partition(FeedbackRecord::is_usable);
        if !skipped.is_empty() {
            warn!(skipped = skipped.len(), "skipped feedback entries without query or tables");
        }

        self.storage.import_batch(&usable, &document.query_counts)?;
        write_json(self.cache.as_ref(), &self.mirror_key, &usable);
        info!(path = %path.display(), rows = usable.len(), "imported feedback");
        Ok(usable.len())
    }

    /// Delete rows, counts, and the cache mirror.
    pub fn clear_feedback(&self) {
        if let Err(e) = self.storage.clear() {
            error!(error = %e, "failed to clear feedback storage");
        }
        if let Err(e) = self.cache.delete(&self.mirror_key) {
            error!(key = %self.mirror_key, error = %e, "failed to clear feedback cache");
        }
        info!("cleared feedback");
    }

    fn read_mirror(&self) -> Vec<FeedbackRecord> {
        match read_json(self.cache.as_ref(), &self.mirror_key) {
            CacheRead::Hit(records) => records,
            CacheRead::Miss | CacheRead::Unavailable => Vec::new(),
        }
    }
}
