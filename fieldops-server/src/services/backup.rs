//! JSON backup export / import
//!
//! Import is all-or-nothing: every table is cleared and refilled inside one
//! transaction. The delivery log is not part of a backup and is kept.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{BACKUP_VERSION, BackupDocument, BackupImportSummary};
use sqlx::SqlitePool;

use crate::db::repository::{
    RepoError, chain_price_tag, device, email, fixture, launch, pending_visit, store, tactician,
    training, visit,
};

/// Children before parents
const CLEAR_ORDER: &[&str] = &[
    "training_sessions",
    "pending_store_visits",
    "visits",
    "store_fixtures",
    "chain_price_tags",
    "fixtures",
    "launches",
    "tacticians",
    "devices",
    "stores",
    "email_templates",
];

fn invalid(table: &str) -> impl Fn(RepoError) -> AppError + '_ {
    move |e| {
        AppError::with_message(ErrorCode::InvalidBackup, format!("Invalid {table} row: {e}"))
            .with_detail("table", table)
    }
}

pub async fn export(pool: &SqlitePool) -> AppResult<BackupDocument> {
    let doc = BackupDocument {
        version: BACKUP_VERSION.to_string(),
        exported_at: chrono::Utc::now().to_rfc3339(),
        stores: store::find_all(pool, None, None).await?,
        devices: device::find_all(pool, false).await?,
        fixtures: fixture::find_all(pool).await?,
        store_fixtures: fixture::find_all_links(pool).await?,
        chain_price_tags: chain_price_tag::find_all(pool).await?,
        launches: launch::find_all(pool, None).await?,
        tacticians: tactician::find_all(pool, false).await?,
        visits: visit::find_all(pool).await?,
        pending_store_visits: pending_visit::find_all(pool).await?,
        training_sessions: training::find_all(pool).await?,
        email_templates: email::find_all(pool).await?,
    };
    tracing::info!(
        stores = doc.stores.len(),
        visits = doc.visits.len(),
        "Backup exported"
    );
    Ok(doc)
}

/// Replace the whole database with the document's content
pub async fn import(pool: &SqlitePool, doc: &BackupDocument) -> AppResult<BackupImportSummary> {
    if doc.version != BACKUP_VERSION {
        return Err(AppError::new(ErrorCode::BackupVersionUnsupported)
            .with_detail("version", doc.version.clone())
            .with_detail("expected", BACKUP_VERSION));
    }

    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;

    for table in CLEAR_ORDER {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
    }

    for row in &doc.stores {
        store::insert_row(&mut *tx, row).await.map_err(invalid("stores"))?;
    }
    for row in &doc.devices {
        device::insert_row(&mut *tx, row).await.map_err(invalid("devices"))?;
    }
    for row in &doc.fixtures {
        fixture::insert_row(&mut *tx, row).await.map_err(invalid("fixtures"))?;
    }
    for row in &doc.store_fixtures {
        fixture::insert_link(&mut *tx, row).await.map_err(invalid("store_fixtures"))?;
    }
    for row in &doc.chain_price_tags {
        chain_price_tag::insert_row(&mut *tx, row)
            .await
            .map_err(invalid("chain_price_tags"))?;
    }
    for row in &doc.launches {
        launch::insert_row(&mut *tx, row).await.map_err(invalid("launches"))?;
    }
    for row in &doc.tacticians {
        tactician::insert_row(&mut *tx, row).await.map_err(invalid("tacticians"))?;
    }
    for row in &doc.visits {
        visit::insert_row(&mut *tx, row).await.map_err(invalid("visits"))?;
    }
    for row in &doc.pending_store_visits {
        pending_visit::insert_row(&mut *tx, row)
            .await
            .map_err(invalid("pending_store_visits"))?;
    }
    for row in &doc.training_sessions {
        training::insert_row(&mut *tx, row)
            .await
            .map_err(invalid("training_sessions"))?;
    }
    for row in &doc.email_templates {
        email::insert_row(&mut *tx, row).await.map_err(invalid("email_templates"))?;
    }

    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    let summary = BackupImportSummary {
        stores: doc.stores.len(),
        devices: doc.devices.len(),
        fixtures: doc.fixtures.len(),
        store_fixtures: doc.store_fixtures.len(),
        chain_price_tags: doc.chain_price_tags.len(),
        launches: doc.launches.len(),
        tacticians: doc.tacticians.len(),
        visits: doc.visits.len(),
        pending_store_visits: doc.pending_store_visits.len(),
        training_sessions: doc.training_sessions.len(),
        email_templates: doc.email_templates.len(),
    };
    tracing::info!(?summary, "Backup imported");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{fixtures, scheduling};
    use crate::test_support::{date, seed_device, seed_store, seed_tactician};
    use shared::models::{Chain, DeviceKind, FixtureCreate, PlacedDeviceInput, StoreCategory};

    #[tokio::test]
    async fn test_export_then_import_restores_everything() {
        let pool = crate::db::test_pool().await;
        let phone = seed_device(&pool, "iPhone 17", DeviceKind::Iphone).await;
        let s = seed_store(&pool, "Comet Bologna", StoreCategory::White, Chain::Comet).await;
        seed_tactician(&pool, "Giulia").await;
        let f = fixtures::create(
            &pool,
            FixtureCreate {
                name: "Banco".into(),
                fixture_type: Default::default(),
                devices: vec![PlacedDeviceInput {
                    device_id: phone.id,
                    position: 1,
                    color: Some("Nero".into()),
                    quantity: 1,
                }],
                notes: None,
            },
        )
        .await
        .unwrap();
        fixtures::attach(&pool, s.id, f.id).await.unwrap();
        let p = scheduling::import_one(&pool, s.id, StoreCategory::White, None).await.unwrap();
        scheduling::schedule_pending(&pool, p.id, date("2026-10-21"), None, date("2026-10-19"))
            .await
            .unwrap();

        let doc = export(&pool).await.unwrap();
        assert_eq!(doc.version, "1.0");
        let json = serde_json::to_string(&doc).unwrap();

        let restored_pool = crate::db::test_pool().await;
        let parsed: BackupDocument = serde_json::from_str(&json).unwrap();
        let summary = import(&restored_pool, &parsed).await.unwrap();
        assert_eq!(summary.stores, 1);
        assert_eq!(summary.visits, 1);
        assert_eq!(summary.chain_price_tags, 1);

        let again = export(&restored_pool).await.unwrap();
        assert_eq!(again.fixtures, doc.fixtures);
        assert_eq!(again.visits, doc.visits);
        assert_eq!(again.store_fixtures, doc.store_fixtures);
    }

    #[tokio::test]
    async fn test_import_rejects_unknown_version() {
        let pool = crate::db::test_pool().await;
        seed_store(&pool, "Keep", StoreCategory::White, Chain::Comet).await;

        let mut doc = export(&pool).await.unwrap();
        doc.version = "2.0".into();
        doc.stores.clear();
        let err = import(&pool, &doc).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BackupVersionUnsupported);
        assert_eq!(store::find_all(&pool, None, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_import_rolls_back() {
        let pool = crate::db::test_pool().await;
        let s = seed_store(&pool, "Keep", StoreCategory::White, Chain::Comet).await;

        let mut doc = export(&pool).await.unwrap();
        // Visit pointing at a store that is not in the document
        doc.visits.push(shared::models::Visit {
            id: 1,
            store_id: s.id + 1,
            launch_id: None,
            scheduled_date: date("2026-10-21"),
            visit_type: StoreCategory::White,
            status: Default::default(),
            tactician_id: None,
            notes: None,
            created_at: 0,
            updated_at: 0,
        });
        let err = import(&pool, &doc).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidBackup);
        assert_eq!(store::find_all(&pool, None, None).await.unwrap().len(), 1);
    }
}
