//! Backup document

use serde::{Deserialize, Serialize};

use super::chain_price_tag::ChainPriceTag;
use super::device::Device;
use super::email_template::EmailTemplate;
use super::fixture::{Fixture, StoreFixture};
use super::launch::Launch;
use super::store::Store;
use super::tactician::Tactician;
use super::training::TrainingSession;
use super::visit::{PendingStoreVisit, Visit};

/// The only accepted backup format version
pub const BACKUP_VERSION: &str = "1.0";

/// Whole-database JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    pub version: String,
    pub exported_at: String,
    #[serde(default)]
    pub stores: Vec<Store>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
    #[serde(default)]
    pub store_fixtures: Vec<StoreFixture>,
    #[serde(default)]
    pub chain_price_tags: Vec<ChainPriceTag>,
    #[serde(default)]
    pub launches: Vec<Launch>,
    #[serde(default)]
    pub tacticians: Vec<Tactician>,
    #[serde(default)]
    pub visits: Vec<Visit>,
    #[serde(default)]
    pub pending_store_visits: Vec<PendingStoreVisit>,
    #[serde(default)]
    pub training_sessions: Vec<TrainingSession>,
    #[serde(default)]
    pub email_templates: Vec<EmailTemplate>,
}

/// Row counts restored by an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupImportSummary {
    pub stores: usize,
    pub devices: usize,
    pub fixtures: usize,
    pub store_fixtures: usize,
    pub chain_price_tags: usize,
    pub launches: usize,
    pub tacticians: usize,
    pub visits: usize,
    pub pending_store_visits: usize,
    pub training_sessions: usize,
    pub email_templates: usize,
}
