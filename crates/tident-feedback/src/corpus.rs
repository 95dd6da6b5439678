//! Historical query → tables pairs loaded from a JSON list or a trainer CSV
//! (`query` and `tables` columns, `tables` holding a JSON list).

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use tident_core::errors::{FeedbackError, TidentError, TidentResult};
use tident_core::models::CorpusRecord;
use tident_core::traits::INlpProvider;
use tident_core::TableId;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    query: String,
    #[serde(default)]
    tables: String,
}

fn malformed(path: &Path, reason: impl ToString) -> TidentError {
    FeedbackError::MalformedCorpus {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
    .into()
}

pub struct HistoricalCorpus {
    records: Vec<CorpusRecord>,
    similarity_threshold: f64,
    nlp: Arc<dyn INlpProvider>,
}

impl HistoricalCorpus {
    pub fn new(
        records: Vec<CorpusRecord>,
        similarity_threshold: f64,
        nlp: Arc<dyn INlpProvider>,
    ) -> Self {
        Self {
            records,
            similarity_threshold,
            nlp,
        }
    }

    pub fn empty(nlp: Arc<dyn INlpProvider>) -> Self {
        Self::new(Vec::new(), f64::INFINITY, nlp)
    }

    /// Strict parse of a corpus file. A `.csv` extension selects the CSV
    /// layout; anything else is read as a JSON list.
    pub fn parse_file(path: &Path) -> TidentResult<Vec<CorpusRecord>> {
        let raw = std::fs::read_to_string(path).map_err(|e| TidentError::io(path, e))?;
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            Self::parse_csv(path, &raw)
        } else {
            serde_json::from_str(&raw).map_err(|e| malformed(path, e))
        }
    }

    /// Rows with an empty query or table cell are skipped.
    fn parse_csv(path: &Path, raw: &str) -> TidentResult<Vec<CorpusRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(raw.as_bytes());

        let mut records = Vec::new();
        for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
            let row = result.map_err(|e| malformed(path, e))?;
            if row.query.is_empty() || row.tables.is_empty() {
                debug!(row = line + 1, "skipping corpus row without query or tables");
                continue;
            }
            let tables: Vec<TableId> = serde_json::from_str(&row.tables)
                .map_err(|e| malformed(path, format!("row {}: {e}", line + 1)))?;
            records.push(CorpusRecord {
                query: row.query,
                tables,
            });
        }
        Ok(records)
    }

    /// Load a corpus, degrading to an empty one when the file is missing
    /// or malformed.
    pub fn load(path: &Path, similarity_threshold: f64, nlp: Arc<dyn INlpProvider>) -> Self {
        match Self::parse_file(path) {
            Ok(records) => {
                debug!(path = %path.display(), records = records.len(), "loaded query corpus");
                Self::new(records, similarity_threshold, nlp)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "query corpus unavailable");
                Self::new(Vec::new(), similarity_threshold, nlp)
            }
        }
    }

    /// Union of the tables of every record similar enough to the query, in
    /// first-seen order.
    pub fn matching_tables(&self, query: &str) -> Vec<TableId> {
        if self.records.is_empty() || !self.nlp.is_available() {
            return Vec::new();
        }
        let query = query.to_lowercase();
        let mut tables: Vec<TableId> = Vec::new();
        for record in &self.records {
            let similarity = match self.nlp.similarity(&query, &record.query.to_lowercase()) {
                Ok(similarity) => similarity,
                Err(e) => {
                    warn!(error = %e, "corpus similarity failed");
                    return Vec::new();
                }
            };
            if similarity > self.similarity_threshold {
                for table in &record.tables {
                    if !tables.contains(table) {
                        tables.push(table.clone());
                    }
                }
            }
        }
        tables
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
