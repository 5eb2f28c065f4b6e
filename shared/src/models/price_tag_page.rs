//! Public price-tag page payload

use serde::{Deserialize, Serialize};

use super::fixture::PriceTagSource;

/// One downloadable tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPriceTag {
    pub name: String,
    pub source: PriceTagSource,
    pub fixture_name: Option<String>,
    pub download_url: Option<String>,
}

/// Price tags a store needs for a launch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicPriceTagPage {
    pub launch_name: String,
    pub launch_slug: String,
    pub store_name: String,
    pub store_slug: String,
    pub tags: Vec<PublicPriceTag>,
}

/// Stored PDF metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub file_name: String,
    pub size: u64,
    pub sha256: String,
}
