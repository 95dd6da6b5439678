/// tident library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Separator between the catalog id and the artifact name in cache keys.
pub const CACHE_KEY_SEPARATOR: char = ':';

/// Language code the query gate accepts.
pub const SUPPORTED_LANGUAGE: &str = "en";

/// Column types that a DATE entity widens to.
pub const DATE_COLUMN_TYPES: [&str; 3] = ["date", "datetime", "timestamp"];

/// Column-name fragments that a geographic entity widens to.
pub const GEO_COLUMN_TERMS: [&str; 3] = ["city", "state", "country"];
