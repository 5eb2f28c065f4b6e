//! Fixtures shared by unit tests

use chrono::NaiveDate;
use shared::models::{
    Chain, Device, DeviceCreate, DeviceKind, Store, StoreCategory, StoreCreate, Tactician,
    TacticianCreate,
};
use sqlx::SqlitePool;

use crate::db::repository::{device, store, tactician};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub async fn seed_store(
    pool: &SqlitePool,
    name: &str,
    category: StoreCategory,
    chain: Chain,
) -> Store {
    store::create(
        pool,
        StoreCreate {
            name: name.into(),
            category,
            chain,
            address: None,
            city: Some("Milano".into()),
            province: None,
            phone: None,
            email: None,
            manager_name: None,
            notes: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_device(pool: &SqlitePool, name: &str, kind: DeviceKind) -> Device {
    device::create(
        pool,
        DeviceCreate {
            name: name.into(),
            kind,
            color: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_tactician(pool: &SqlitePool, name: &str) -> Tactician {
    tactician::create(
        pool,
        TacticianCreate {
            name: name.into(),
            email: Some(format!("{}@fieldops.test", name.to_lowercase())),
            phone: None,
            region: None,
        },
    )
    .await
    .unwrap()
}
