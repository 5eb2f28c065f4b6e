//! Chain-wide price tag catalog

use serde::{Deserialize, Serialize};

use super::fixture::PriceTagSource;
use super::store::Chain;

/// One catalog entry per (chain, name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ChainPriceTag {
    pub id: i64,
    pub chain: Chain,
    pub name: String,
    pub source: PriceTagSource,
    pub pdf_file: Option<String>,
    pub created_at: i64,
}

/// Create a manual chain price tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainPriceTagCreate {
    pub chain: Chain,
    pub name: String,
}

/// Result of reconciling one chain's auto tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSyncReport {
    pub chain: Option<Chain>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub unchanged: usize,
}
