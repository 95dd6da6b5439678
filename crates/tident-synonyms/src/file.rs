//! The per-catalog synonym file: `{table: [lemma, ...]}` as pretty JSON.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error, warn};

use tident_core::errors::{TidentError, TidentResult};
use tident_core::TableId;

/// Duplicate-free, ordered lemmas per table.
pub type SynonymSet = BTreeMap<TableId, Vec<String>>;

/// `{data_dir}/{catalog_id}_synonyms.json`.
pub fn synonyms_path(data_dir: &Path, catalog_id: &str) -> PathBuf {
    data_dir.join(format!("{catalog_id}_synonyms.json"))
}

/// A missing or unreadable file yields an empty set. Entries whose key is
/// not `schema.table` or whose value is not a list of strings are dropped.
pub fn load_synonyms(path: &Path) -> SynonymSet {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no synonym file, starting empty");
            return SynonymSet::new();
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to read synonym file");
            return SynonymSet::new();
        }
    };
    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            error!(path = %path.display(), error = %e, "malformed synonym file");
            return SynonymSet::new();
        }
    };
    let Value::Object(entries) = value else {
        warn!(path = %path.display(), "synonym file is not an object");
        return SynonymSet::new();
    };

    let mut synonyms = SynonymSet::new();
    for (key, value) in entries {
        let Ok(table) = TableId::parse(&key) else {
            warn!(key = %key, "dropping synonym entry with invalid table id");
            continue;
        };
        let Some(lemmas) = string_list(&value) else {
            warn!(table = %table, "dropping synonym entry that is not a string list");
            continue;
        };
        let list: &mut Vec<String> = synonyms.entry(table).or_default();
        for lemma in lemmas {
            if !list.contains(&lemma) {
                list.push(lemma);
            }
        }
    }
    debug!(path = %path.display(), tables = synonyms.len(), "loaded synonyms");
    synonyms
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

pub fn save_synonyms(path: &Path, synonyms: &SynonymSet) -> TidentResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| TidentError::io(parent, e))?;
    }
    let raw = serde_json::to_string_pretty(synonyms)?;
    std::fs::write(path, raw).map_err(|e| TidentError::io(path, e))?;
    debug!(path = %path.display(), tables = synonyms.len(), "saved synonyms");
    Ok(())
}
