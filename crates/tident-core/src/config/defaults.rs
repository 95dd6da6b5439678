// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "tident.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Cache ---
pub const DEFAULT_L1_MAX_ENTRIES: u64 = 1_000;
pub const DEFAULT_L1_TTL_SECS: u64 = 86_400; // 24 hours

// --- Synonyms ---
pub const DEFAULT_SYNONYM_DATA_DIR: &str = "app-config";
pub const DEFAULT_LITERAL_HIT_SCORE: f64 = 0.9;
pub const DEFAULT_SYNONYM_SIMILARITY_THRESHOLD: f64 = 0.8;

// --- Feedback ---
pub const DEFAULT_FEEDBACK_SIMILARITY_THRESHOLD: f64 = 0.8;
pub const DEFAULT_CORPUS_SIMILARITY_THRESHOLD: f64 = 0.85;
pub const DEFAULT_FEEDBACK_WEIGHT: f64 = 1.0;
pub const DEFAULT_TOP_QUERIES_LIMIT: usize = 5;

// --- Weights ---
pub const DEFAULT_TABLE_WEIGHT: f64 = 1.0;
pub const DEFAULT_WEIGHT_FLOOR: f64 = 0.5;
pub const DEFAULT_SELECTED_BOOST: f64 = 0.3;
pub const DEFAULT_UNSELECTED_PENALTY: f64 = 0.85;
pub const DEFAULT_STALE_DECAY: f64 = 0.95;

// --- Ranking ---
pub const DEFAULT_PATTERN_CONFIDENCE: f64 = 0.9;
pub const DEFAULT_FEEDBACK_CONFIDENCE: f64 = 0.95;
pub const DEFAULT_NAME_MATCH_THRESHOLD: f64 = 0.8;
pub const DEFAULT_MAX_RANKED_TABLES: usize = 5;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_HISTORY_SIZE: usize = 10;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
