use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed semantic categories a query keyword can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Name,
    Details,
    Stock,
    Category,
    Order,
    Brand,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::Name,
        Intent::Details,
        Intent::Stock,
        Intent::Category,
        Intent::Order,
        Intent::Brand,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Details => "details",
            Self::Stock => "stock",
            Self::Category => "category",
            Self::Order => "order",
            Self::Brand => "brand",
        }
    }

    /// Keywords every intent map starts from.
    pub fn default_keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Name => &["name", "first_name", "last_name", "fname", "lname"],
            Self::Details => &["address", "city", "state", "zip_code", "store_name"],
            Self::Stock => &["quantity", "stock", "inventory"],
            Self::Category => &["category", "category_name"],
            Self::Order => &["order", "order_id", "sales", "purchase"],
            Self::Brand => &["brand", "brand_name"],
        }
    }

    /// Fragments that make a catalog column name a keyword of this intent
    /// when the map is built.
    pub fn column_terms(&self) -> &'static [&'static str] {
        match self {
            Self::Name => &["name"],
            Self::Details => &["address", "city", "state", "zip"],
            Self::Stock => &["quantity", "stock", "inventory"],
            Self::Category => &["category"],
            Self::Order => &["order", "sales", "purchase"],
            Self::Brand => &["brand"],
        }
    }

    /// Exact column names that let confirmed feedback extend this intent.
    pub fn trigger_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Name => &["first_name", "last_name", "name"],
            Self::Details => &["address", "city", "state", "zip_code", "store_name"],
            Self::Stock => &["quantity", "stock", "inventory"],
            Self::Category => &["category_name"],
            Self::Order => &["order_id", "sales"],
            Self::Brand => &["brand_name"],
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
