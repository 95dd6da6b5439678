//! Workspace configuration, loaded from TOML. Every section defaults independently.

pub mod defaults;

mod cache_config;
mod feedback_config;
mod observability_config;
mod ranking_config;
mod storage_config;
mod synonym_config;
mod weight_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use cache_config::CacheConfig;
pub use feedback_config::FeedbackConfig;
pub use observability_config::ObservabilityConfig;
pub use ranking_config::RankingConfig;
pub use storage_config::StorageConfig;
pub use synonym_config::SynonymConfig;
pub use weight_config::WeightConfig;

use crate::errors::{TidentError, TidentResult};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TidentConfig {
    pub storage: StorageConfig,
    pub cache: CacheConfig,
    pub synonyms: SynonymConfig,
    pub feedback: FeedbackConfig,
    pub weights: WeightConfig,
    pub ranking: RankingConfig,
    pub observability: ObservabilityConfig,
}

impl TidentConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml(source: &str) -> TidentResult<Self> {
        toml::from_str(source).map_err(|e| TidentError::ConfigError {
            reason: e.to_string(),
        })
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> TidentResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| TidentError::io(path, e))?;
        Self::from_toml(&source)
    }
}
