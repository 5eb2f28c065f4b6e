//! Store Model

use serde::{Deserialize, Serialize};

/// Store category, also used as the visit type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum StoreCategory {
    #[default]
    White,
    Tier2,
}

impl StoreCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Tier2 => "tier2",
        }
    }
}

/// Retail chain a store belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum Chain {
    Mediaworld,
    Unieuro,
    Euronics,
    Comet,
}

impl Chain {
    pub const ALL: [Chain; 4] = [Self::Mediaworld, Self::Unieuro, Self::Euronics, Self::Comet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mediaworld => "mediaworld",
            Self::Unieuro => "unieuro",
            Self::Euronics => "euronics",
            Self::Comet => "comet",
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub category: StoreCategory,
    pub chain: Chain,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub manager_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Store {
    /// Slug used by the public price-tag route
    pub fn slug(&self) -> String {
        crate::util::slugify(&self.name)
    }
}

/// Create store payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCreate {
    pub name: String,
    #[serde(default)]
    pub category: StoreCategory,
    pub chain: Chain,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub manager_name: Option<String>,
    pub notes: Option<String>,
}

/// Update store payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreUpdate {
    pub name: Option<String>,
    pub category: Option<StoreCategory>,
    pub chain: Option<Chain>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub manager_name: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_format() {
        assert_eq!(serde_json::to_string(&StoreCategory::Tier2).unwrap(), "\"tier2\"");
        let c: StoreCategory = serde_json::from_str("\"white\"").unwrap();
        assert_eq!(c, StoreCategory::White);
    }

    #[test]
    fn test_chain_wire_format() {
        for chain in Chain::ALL {
            let json = serde_json::to_string(&chain).unwrap();
            assert_eq!(json, format!("\"{}\"", chain.as_str()));
        }
    }
}
