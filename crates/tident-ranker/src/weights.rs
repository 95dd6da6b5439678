//! Per-table weights: boosted on confirmation, decayed otherwise, floored.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::{debug, info};

use tident_core::config::WeightConfig;
use tident_core::errors::{TidentError, TidentResult};
use tident_core::models::{cache_key, Artifact};
use tident_core::traits::ICacheStore;
use tident_core::{Catalog, TableId};

use tident_storage::cache::{read_json, write_json, CacheRead};

pub type Weights = BTreeMap<TableId, f64>;

#[derive(Serialize)]
struct ModelExport<'a> {
    weights: &'a Weights,
}

pub struct WeightLedger {
    key: String,
    config: WeightConfig,
    cache: Arc<dyn ICacheStore>,
    weights: RwLock<Weights>,
}

impl WeightLedger {
    /// Cached weights when present; otherwise every catalog table at the
    /// default weight, persisted.
    pub fn load(
        catalog_id: &str,
        catalog: &Catalog,
        cache: Arc<dyn ICacheStore>,
        config: &WeightConfig,
    ) -> Self {
        let key = cache_key(catalog_id, Artifact::Weights);
        let weights = match read_json::<Weights>(cache.as_ref(), &key) {
            CacheRead::Hit(weights) => {
                debug!(catalog_id, tables = weights.len(), "loaded weights from cache");
                weights
            }
            CacheRead::Miss | CacheRead::Unavailable => {
                let weights = Self::initial(catalog, config);
                write_json(cache.as_ref(), &key, &weights);
                weights
            }
        };
        Self {
            key,
            config: config.clone(),
            cache,
            weights: RwLock::new(weights),
        }
    }

    /// Fresh weights for the catalog, overwriting the cached ledger.
    pub fn reset(
        catalog_id: &str,
        catalog: &Catalog,
        cache: Arc<dyn ICacheStore>,
        config: &WeightConfig,
    ) -> Self {
        let ledger = Self {
            key: cache_key(catalog_id, Artifact::Weights),
            config: config.clone(),
            cache,
            weights: RwLock::new(Self::initial(catalog, config)),
        };
        ledger.persist();
        ledger
    }

    fn initial(catalog: &Catalog, config: &WeightConfig) -> Weights {
        catalog
            .table_ids()
            .map(|id| (id.clone(), config.default_weight))
            .collect()
    }

    /// Weight of a table, or the default for untracked tables.
    pub fn get(&self, table: &TableId) -> f64 {
        self.weights
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(table)
            .copied()
            .unwrap_or(self.config.default_weight)
    }

    pub fn snapshot(&self) -> Weights {
        self.weights.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Boost `selected`, penalize the rest of `known`, decay tracked tables
    /// outside `known`. Persists afterwards.
    pub fn adjust(&self, selected: &[TableId], known: &[TableId]) {
        let selected_set: BTreeSet<&TableId> = selected.iter().collect();
        let known_set: BTreeSet<&TableId> = known.iter().collect();
        let floor = self.config.floor;
        {
            let mut weights = self.weights.write().unwrap_or_else(PoisonError::into_inner);
            for table in &selected_set {
                let weight = weights
                    .entry((*table).clone())
                    .or_insert(self.config.default_weight);
                *weight += self.config.selected_boost;
                debug!(table = %table, weight = *weight, "boosted weight");
            }
            for table in known_set.difference(&selected_set) {
                let weight = weights
                    .entry((*table).clone())
                    .or_insert(self.config.default_weight);
                *weight = floor.max(*weight * self.config.unselected_penalty);
            }
            let stale: Vec<TableId> = weights
                .keys()
                .filter(|table| !known_set.contains(table))
                .cloned()
                .collect();
            for table in stale {
                if let Some(weight) = weights.get_mut(&table) {
                    *weight = floor.max(*weight * self.config.stale_decay);
                    debug!(table = %table, weight = *weight, "decayed stale weight");
                }
            }
        }
        self.persist();
    }

    fn persist(&self) {
        let weights = self.snapshot();
        write_json(self.cache.as_ref(), &self.key, &weights);
    }

    /// Write `{"weights": {...}}` to `path`.
    pub fn export_model(&self, path: &Path) -> TidentResult<()> {
        let weights = self.snapshot();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TidentError::io(parent, e))?;
        }
        let raw = serde_json::to_string_pretty(&ModelExport { weights: &weights })?;
        std::fs::write(path, raw).map_err(|e| TidentError::io(path, e))?;
        info!(path = %path.display(), tables = weights.len(), "exported weight model");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tident_storage::MemoryCache;

    fn table(value: &str) -> TableId {
        TableId::parse(value).unwrap()
    }

    fn ledger_with(weights: Weights) -> WeightLedger {
        WeightLedger {
            key: "t:weights".to_string(),
            config: WeightConfig::default(),
            cache: Arc::new(MemoryCache::default()),
            weights: RwLock::new(weights),
        }
    }

    #[test]
    fn adjust_boosts_penalizes_and_decays() {
        let a = table("s.a");
        let b = table("s.b");
        let gone = table("s.gone");
        let ledger = ledger_with(BTreeMap::from([
            (a.clone(), 1.0),
            (b.clone(), 1.0),
            (gone.clone(), 1.0),
        ]));

        ledger.adjust(&[a.clone()], &[a.clone(), b.clone()]);

        assert!((ledger.get(&a) - 1.3).abs() < 1e-9);
        assert!((ledger.get(&b) - 0.85).abs() < 1e-9);
        assert!((ledger.get(&gone) - 0.95).abs() < 1e-9);
    }

    #[test]
    fn penalties_stop_at_the_floor() {
        let a = table("s.a");
        let b = table("s.b");
        let ledger = ledger_with(BTreeMap::from([(a.clone(), 1.0), (b.clone(), 0.55)]));
        ledger.adjust(&[a.clone()], &[a, b.clone()]);
        assert_eq!(ledger.get(&b), 0.5);
    }

    #[test]
    fn untracked_tables_read_as_default() {
        let ledger = ledger_with(Weights::new());
        assert_eq!(ledger.get(&table("s.x")), 1.0);
    }
}
