//! Price-tag derivation and chain catalog reconciliation
//!
//! Fixture rows carry their own tag list: manual tags plus one `auto` tag per
//! distinct iPhone/Watch device name. The chain catalog holds, per chain, one
//! row per auto tag name found on any fixture attached to a store of that
//! chain. Reconciliation only inserts or deletes `auto` catalog rows; manual
//! rows are left alone.

use std::collections::{BTreeSet, HashMap, HashSet};

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Chain, ChainPriceTag, ChainSyncReport, Fixture, PlacedDevice, PriceTagDescriptor,
    PriceTagSource,
};
use sqlx::SqlitePool;

use crate::db::repository::{chain_price_tag, fixture};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};

/// Recompute a fixture's tag list from its devices.
///
/// Manual tags are kept in order. Auto tags follow device position order,
/// skip names already covered by a manual tag, and keep any PDF previously
/// attached to the auto tag of the same name.
pub fn derive_fixture_tags(
    devices: &[PlacedDevice],
    existing: &[PriceTagDescriptor],
) -> Vec<PriceTagDescriptor> {
    let mut tags: Vec<PriceTagDescriptor> = existing
        .iter()
        .filter(|t| t.source == PriceTagSource::Manual)
        .cloned()
        .collect();

    let old_pdfs: HashMap<&str, &Option<String>> = existing
        .iter()
        .filter(|t| t.source == PriceTagSource::Auto)
        .map(|t| (t.name.as_str(), &t.pdf_file))
        .collect();

    let mut ordered: Vec<&PlacedDevice> = devices.iter().collect();
    ordered.sort_by_key(|d| d.position);

    let mut seen: HashSet<String> = tags.iter().map(|t| t.name.clone()).collect();
    for device in ordered {
        if !device.kind.has_auto_price_tag() {
            continue;
        }
        let name = device.name.trim();
        if name.is_empty() || !seen.insert(name.to_string()) {
            continue;
        }
        tags.push(PriceTagDescriptor {
            name: name.to_string(),
            source: PriceTagSource::Auto,
            device_id: Some(device.device_id),
            pdf_file: old_pdfs.get(name).and_then(|p| (*p).clone()),
        });
    }
    tags
}

/// Auto tag names required by a set of fixtures
pub fn desired_chain_tags(fixtures: &[Fixture]) -> BTreeSet<String> {
    fixtures
        .iter()
        .flat_map(|f| f.price_tags.iter())
        .filter(|t| t.source == PriceTagSource::Auto)
        .map(|t| t.name.clone())
        .collect()
}

/// Re-derive and persist the tag list of one fixture
pub async fn sync_fixture(pool: &SqlitePool, fixture_id: i64) -> AppResult<Fixture> {
    let mut f = fixture::find_by_id(pool, fixture_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::FixtureNotFound).with_detail("id", fixture_id))?;

    let tags = derive_fixture_tags(&f.devices, &f.price_tags);
    if tags != f.price_tags {
        fixture::set_price_tags(pool, fixture_id, &tags).await?;
        f.price_tags = tags;
    }
    Ok(f)
}

/// Diff the catalog of one chain against its fixtures and apply the
/// difference in a single transaction.
pub async fn sync_chain(pool: &SqlitePool, chain: Chain) -> AppResult<ChainSyncReport> {
    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;

    let fixtures = fixture::find_by_chain(&mut *tx, chain).await?;
    let desired = desired_chain_tags(&fixtures);
    let existing = chain_price_tag::find_by_chain(&mut *tx, chain).await?;
    let existing_names: HashSet<&str> = existing.iter().map(|t| t.name.as_str()).collect();

    let mut report = ChainSyncReport {
        chain: Some(chain),
        ..Default::default()
    };

    for row in existing.iter().filter(|t| t.source == PriceTagSource::Auto) {
        if desired.contains(&row.name) {
            report.unchanged += 1;
        } else {
            chain_price_tag::delete(&mut *tx, row.id).await?;
            report.removed.push(row.name.clone());
        }
    }
    for name in &desired {
        // A manual row with the same name already satisfies the catalog
        if !existing_names.contains(name.as_str()) {
            chain_price_tag::insert(&mut *tx, chain, name, PriceTagSource::Auto).await?;
            report.added.push(name.clone());
        }
    }

    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    if !report.added.is_empty() || !report.removed.is_empty() {
        tracing::info!(
            chain = %chain,
            added = report.added.len(),
            removed = report.removed.len(),
            "Chain price tag catalog reconciled"
        );
    }
    Ok(report)
}

/// Reconcile several chains (deduplicated)
pub async fn sync_chains(
    pool: &SqlitePool,
    chains: impl IntoIterator<Item = Chain>,
) -> AppResult<Vec<ChainSyncReport>> {
    let unique: BTreeSet<Chain> = chains.into_iter().collect();
    let mut reports = Vec::with_capacity(unique.len());
    for chain in unique {
        reports.push(sync_chain(pool, chain).await?);
    }
    Ok(reports)
}

/// Re-derive every fixture, then reconcile every chain
pub async fn sync_all(pool: &SqlitePool) -> AppResult<Vec<ChainSyncReport>> {
    for f in fixture::find_all(pool).await? {
        sync_fixture(pool, f.id).await?;
    }
    sync_chains(pool, Chain::ALL).await
}

// ── Manual catalog entries ──────────────────────────────────────────

/// Add a manual chain tag
pub async fn add_chain_tag(pool: &SqlitePool, chain: Chain, name: &str) -> AppResult<ChainPriceTag> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    let name = name.trim();
    let existing = chain_price_tag::find_by_chain(pool, chain).await?;
    if existing.iter().any(|t| t.name == name) {
        return Err(AppError::new(ErrorCode::PriceTagNameExists)
            .with_detail("chain", chain.as_str())
            .with_detail("name", name));
    }
    Ok(chain_price_tag::insert(pool, chain, name, PriceTagSource::Manual).await?)
}

/// Remove a manual chain tag. Auto rows belong to reconciliation.
pub async fn remove_chain_tag(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let tag = chain_price_tag::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PriceTagNotFound).with_detail("id", id))?;
    if tag.source == PriceTagSource::Auto {
        return Err(AppError::validation(
            "Automatic chain tags are managed by synchronization and cannot be removed",
        )
        .with_detail("id", id));
    }
    chain_price_tag::delete(pool, id).await?;
    // An auto tag of the same name may now be required again
    sync_chain(pool, tag.chain).await?;
    Ok(())
}

/// Attach an uploaded PDF to a chain tag
pub async fn set_chain_tag_pdf(pool: &SqlitePool, id: i64, file_name: &str) -> AppResult<ChainPriceTag> {
    if !chain_price_tag::set_pdf_file(pool, id, Some(file_name)).await? {
        return Err(AppError::new(ErrorCode::PriceTagNotFound).with_detail("id", id));
    }
    chain_price_tag::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PriceTagNotFound).with_detail("id", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures;
    use crate::test_support::{seed_device, seed_store};
    use shared::models::{DeviceKind, FixtureCreate, PlacedDeviceInput, StoreCategory};

    fn placed(id: i64, name: &str, kind: DeviceKind, position: i32) -> PlacedDevice {
        PlacedDevice {
            device_id: id,
            name: name.into(),
            kind,
            position,
            color: None,
            quantity: 1,
        }
    }

    fn input(device_id: i64, position: i32) -> PlacedDeviceInput {
        PlacedDeviceInput {
            device_id,
            position,
            color: None,
            quantity: 1,
        }
    }

    #[test]
    fn test_derive_keeps_manual_and_dedups_auto() {
        let devices = vec![
            placed(3, "Apple Watch S11", DeviceKind::Watch, 2),
            placed(1, "iPhone 17 Pro", DeviceKind::Iphone, 1),
            placed(2, "iPhone 17 Pro", DeviceKind::Iphone, 3),
            placed(4, "iPad Air", DeviceKind::Ipad, 4),
        ];
        let existing = vec![
            PriceTagDescriptor {
                name: "Cover".into(),
                source: PriceTagSource::Manual,
                device_id: None,
                pdf_file: None,
            },
            PriceTagDescriptor {
                name: "iPhone 17 Pro".into(),
                source: PriceTagSource::Auto,
                device_id: Some(1),
                pdf_file: Some("abc.pdf".into()),
            },
            PriceTagDescriptor {
                name: "iPhone 16".into(),
                source: PriceTagSource::Auto,
                device_id: Some(9),
                pdf_file: None,
            },
        ];

        let tags = derive_fixture_tags(&devices, &existing);
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Cover", "iPhone 17 Pro", "Apple Watch S11"]);
        assert_eq!(tags[1].pdf_file.as_deref(), Some("abc.pdf"));
        assert_eq!(tags[2].source, PriceTagSource::Auto);
    }

    #[test]
    fn test_manual_tag_shadows_auto() {
        let devices = vec![placed(1, "iPhone 17", DeviceKind::Iphone, 1)];
        let existing = vec![PriceTagDescriptor {
            name: "iPhone 17".into(),
            source: PriceTagSource::Manual,
            device_id: None,
            pdf_file: None,
        }];
        let tags = derive_fixture_tags(&devices, &existing);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].source, PriceTagSource::Manual);
    }

    #[tokio::test]
    async fn test_same_device_name_on_two_fixtures_gives_one_chain_tag() {
        let pool = crate::db::test_pool().await;
        let a = seed_device(&pool, "iPhone 16 Pro (Black)", DeviceKind::Iphone).await;
        let b = seed_device(&pool, "iPhone 16 Pro (Black)", DeviceKind::Iphone).await;
        let s1 = seed_store(&pool, "MW Milano", StoreCategory::White, Chain::Mediaworld).await;
        let s2 = seed_store(&pool, "MW Roma", StoreCategory::Tier2, Chain::Mediaworld).await;

        let f1 = fixtures::create(
            &pool,
            FixtureCreate {
                name: "Banco 1".into(),
                fixture_type: Default::default(),
                devices: vec![input(a.id, 1)],
                notes: None,
            },
        )
        .await
        .unwrap();
        let f2 = fixtures::create(
            &pool,
            FixtureCreate {
                name: "Banco 2".into(),
                fixture_type: Default::default(),
                devices: vec![input(b.id, 1)],
                notes: None,
            },
        )
        .await
        .unwrap();

        fixtures::attach(&pool, s1.id, f1.id).await.unwrap();
        fixtures::attach(&pool, s2.id, f2.id).await.unwrap();

        let catalog = chain_price_tag::find_by_chain(&pool, Chain::Mediaworld).await.unwrap();
        let matching: Vec<_> = catalog
            .iter()
            .filter(|t| t.name == "iPhone 16 Pro (Black)")
            .collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].source, PriceTagSource::Auto);

        // Still present while one fixture carries it
        fixtures::detach(&pool, s1.id, f1.id).await.unwrap();
        assert_eq!(
            chain_price_tag::find_by_chain(&pool, Chain::Mediaworld).await.unwrap().len(),
            1
        );

        fixtures::detach(&pool, s2.id, f2.id).await.unwrap();
        assert!(chain_price_tag::find_by_chain(&pool, Chain::Mediaworld).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reconcile_leaves_manual_rows() {
        let pool = crate::db::test_pool().await;
        let manual = add_chain_tag(&pool, Chain::Unieuro, "Cartello Promo").await.unwrap();

        let report = sync_chain(&pool, Chain::Unieuro).await.unwrap();
        assert!(report.removed.is_empty());
        assert!(report.added.is_empty());

        let catalog = chain_price_tag::find_by_chain(&pool, Chain::Unieuro).await.unwrap();
        assert_eq!(catalog, vec![manual.clone()]);

        let err = add_chain_tag(&pool, Chain::Unieuro, "Cartello Promo").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PriceTagNameExists);

        remove_chain_tag(&pool, manual.id).await.unwrap();
        assert!(chain_price_tag::find_by_chain(&pool, Chain::Unieuro).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_chain_tag_rejects_blank_name() {
        let pool = crate::db::test_pool().await;

        let err = add_chain_tag(&pool, Chain::Comet, "   ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let err = add_chain_tag(&pool, Chain::Comet, &"x".repeat(MAX_NAME_LEN + 1))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        assert!(chain_price_tag::find_by_chain(&pool, Chain::Comet).await.unwrap().is_empty());
    }
}
