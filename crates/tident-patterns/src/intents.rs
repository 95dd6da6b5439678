//! Intent → keyword map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tident_core::{Catalog, Intent};

/// Ordered, duplicate-free keywords per intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentMap(BTreeMap<Intent, Vec<String>>);

impl Default for IntentMap {
    fn default() -> Self {
        Self::defaults()
    }
}

impl IntentMap {
    /// Built-in keywords only.
    pub fn defaults() -> Self {
        Self(
            Intent::ALL
                .iter()
                .map(|intent| {
                    let keywords = intent
                        .default_keywords()
                        .iter()
                        .map(|k| k.to_string())
                        .collect();
                    (*intent, keywords)
                })
                .collect(),
        )
    }

    /// Defaults plus every lowercase catalog column name containing one of
    /// the intent's column terms.
    pub fn build(catalog: &Catalog) -> Self {
        let mut map = Self::defaults();
        for (_, info) in catalog.tables() {
            for column in info.column_names_lower() {
                for intent in Intent::ALL {
                    if intent.column_terms().iter().any(|t| column.contains(t)) {
                        map.add_keyword(intent, &column);
                    }
                }
            }
        }
        map
    }

    pub fn keywords(&self, intent: Intent) -> &[String] {
        self.0.get(&intent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns whether the keyword was new.
    pub fn add_keyword(&mut self, intent: Intent, keyword: &str) -> bool {
        let keywords = self.0.entry(intent).or_default();
        if keyword.is_empty() || keywords.iter().any(|k| k == keyword) {
            return false;
        }
        keywords.push(keyword.to_string());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (Intent, &[String])> {
        self.0.iter().map(|(intent, kws)| (*intent, kws.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_adds_matching_columns_without_duplicates() {
        let map = IntentMap::build(&test_fixtures::bikestores_catalog());
        let details = map.keywords(Intent::Details);
        assert!(details.starts_with(&[
            "address".to_string(),
            "city".to_string(),
            "state".to_string(),
            "zip_code".to_string(),
            "store_name".to_string(),
        ]));
        assert_eq!(details.iter().filter(|k| *k == "city").count(), 1);
        assert!(map.keywords(Intent::Name).contains(&"product_name".to_string()));
        assert!(map.keywords(Intent::Order).contains(&"order_status".to_string()));
    }

    #[test]
    fn serializes_as_intent_keyed_object() {
        let json = serde_json::to_value(IntentMap::defaults()).unwrap();
        assert_eq!(json["brand"][1], "brand_name");
        let back: IntentMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, IntentMap::defaults());
    }
}
