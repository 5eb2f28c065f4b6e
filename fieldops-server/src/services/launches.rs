//! Launch lifecycle, impacted stores and the public price-tag page

use std::collections::HashSet;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    ImportSummary, Launch, LaunchCreate, LaunchStatus, LaunchUpdate, PublicPriceTag,
    PublicPriceTagPage, Store,
};
use shared::util::slugify;
use sqlx::SqlitePool;

use crate::db::repository::{chain_price_tag, device, fixture, launch, pending_visit, store};
use crate::utils::time::normalize_dates;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::LaunchNotFound).with_detail("id", id)
}

pub async fn load(pool: &SqlitePool, id: i64) -> AppResult<Launch> {
    launch::find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

async fn load_editable(pool: &SqlitePool, id: i64) -> AppResult<Launch> {
    let l = load(pool, id).await?;
    if !l.status.is_editable() {
        return Err(AppError::new(ErrorCode::LaunchNotEditable)
            .with_detail("id", id)
            .with_detail("status", l.status.as_str()));
    }
    Ok(l)
}

/// Deduplicate while keeping order, rejecting unknown devices
async fn check_devices(pool: &SqlitePool, ids: &[i64]) -> AppResult<Vec<i64>> {
    let mut seen = HashSet::new();
    let unique: Vec<i64> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

    let found: HashSet<i64> = device::find_by_ids(pool, &unique)
        .await?
        .into_iter()
        .map(|d| d.id)
        .collect();
    if let Some(missing) = unique.iter().find(|id| !found.contains(id)) {
        return Err(AppError::new(ErrorCode::DeviceNotFound).with_detail("device_id", *missing));
    }
    Ok(unique)
}

pub async fn create(pool: &SqlitePool, data: LaunchCreate) -> AppResult<Launch> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    let device_ids = check_devices(pool, &data.device_ids).await?;
    let dates = normalize_dates(data.dates);

    let created = launch::create(pool, &data.name, data.description, &dates, &device_ids).await?;
    tracing::info!(launch_id = created.id, slug = %created.slug(), "Launch created");
    Ok(created)
}

pub async fn update(pool: &SqlitePool, id: i64, data: LaunchUpdate) -> AppResult<Launch> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    load_editable(pool, id).await?;
    launch::update(pool, id, data).await?.ok_or_else(|| not_found(id))
}

/// Replace the launch dates (stored sorted, without duplicates)
pub async fn set_dates(
    pool: &SqlitePool,
    id: i64,
    dates: Vec<chrono::NaiveDate>,
) -> AppResult<Launch> {
    load_editable(pool, id).await?;
    launch::set_dates(pool, id, &normalize_dates(dates))
        .await?
        .ok_or_else(|| not_found(id))
}

pub async fn set_devices(pool: &SqlitePool, id: i64, device_ids: &[i64]) -> AppResult<Launch> {
    load_editable(pool, id).await?;
    let ids = check_devices(pool, device_ids).await?;
    launch::set_devices(pool, id, &ids).await?.ok_or_else(|| not_found(id))
}

/// Status transition guarded against concurrent changes
pub async fn change_status(pool: &SqlitePool, id: i64, next: LaunchStatus) -> AppResult<Launch> {
    let current = load(pool, id).await?;
    if !current.status.can_transition_to(next) {
        return Err(AppError::with_message(
            ErrorCode::LaunchInvalidTransition,
            format!(
                "Cannot move launch from {} to {}",
                current.status.as_str(),
                next.as_str()
            ),
        ));
    }

    let updated = launch::set_status(pool, id, current.status, next)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::LaunchInvalidTransition,
                "Launch status changed concurrently",
            )
        })?;
    tracing::info!(
        launch_id = id,
        from = current.status.as_str(),
        to = next.as_str(),
        "Launch status changed"
    );
    Ok(updated)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    if !launch::delete(pool, id).await? {
        return Err(not_found(id));
    }
    Ok(())
}

/// Stores whose attached fixtures hold any selected device
pub async fn impacted_stores(pool: &SqlitePool, id: i64) -> AppResult<Vec<Store>> {
    let l = load(pool, id).await?;
    if l.device_ids.is_empty() {
        return Ok(Vec::new());
    }
    let fixture_ids: Vec<i64> = fixture::find_all(pool)
        .await?
        .into_iter()
        .filter(|f| f.contains_any_device(&l.device_ids))
        .map(|f| f.id)
        .collect();
    Ok(store::find_by_fixture_ids(pool, &fixture_ids).await?)
}

/// Queue every impacted store into the launch's pending queue, skipping
/// stores already pending or scheduled there
pub async fn queue_impacted(pool: &SqlitePool, id: i64) -> AppResult<ImportSummary> {
    load_editable(pool, id).await?;
    let stores = impacted_stores(pool, id).await?;

    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;
    let occupied: HashSet<i64> = pending_visit::occupied_store_ids(&mut *tx, Some(id))
        .await?
        .into_iter()
        .collect();

    let mut summary = ImportSummary::default();
    for s in &stores {
        if occupied.contains(&s.id) {
            summary.skipped += 1;
            continue;
        }
        pending_visit::insert(&mut *tx, s.id, Some(id), s.category).await?;
        summary.inserted += 1;
    }
    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(
        launch_id = id,
        inserted = summary.inserted,
        skipped = summary.skipped,
        "Queued impacted stores"
    );
    Ok(summary)
}

/// First launch (oldest) whose name slugifies to `slug`
pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> AppResult<Launch> {
    let wanted = slugify(slug);
    launch::find_all(pool, None)
        .await?
        .into_iter()
        .find(|l| l.slug() == wanted)
        .ok_or_else(|| AppError::new(ErrorCode::LaunchNotFound).with_detail("slug", slug))
}

fn download_url(public_base_url: &str, pdf_file: &Option<String>) -> Option<String> {
    pdf_file
        .as_ref()
        .map(|f| format!("{public_base_url}/api/files/price-tags/{f}"))
}

/// Price tags a store needs for a launch: tags of its fixtures holding a
/// launch device, then chain catalog tags named after a launch device.
///
/// Device names come from both the catalog and the snapshots placed on the
/// store's fixtures, so a renamed device still matches its older tags.
pub async fn public_price_tags(
    pool: &SqlitePool,
    launch_slug: &str,
    store_slug: &str,
    public_base_url: &str,
) -> AppResult<PublicPriceTagPage> {
    let l = find_by_slug(pool, launch_slug).await?;
    let wanted = slugify(store_slug);
    let s = store::find_all(pool, None, None)
        .await?
        .into_iter()
        .find(|s| s.slug() == wanted)
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound).with_detail("slug", store_slug))?;

    let mut device_names: HashSet<String> = device::find_by_ids(pool, &l.device_ids)
        .await?
        .into_iter()
        .map(|d| d.name)
        .collect();
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for f in fixture::find_by_store(pool, s.id).await? {
        if !f.contains_any_device(&l.device_ids) {
            continue;
        }
        device_names.extend(
            f.devices
                .iter()
                .filter(|d| l.device_ids.contains(&d.device_id))
                .map(|d| d.name.clone()),
        );
        for t in &f.price_tags {
            if seen.insert(t.name.clone()) {
                tags.push(PublicPriceTag {
                    name: t.name.clone(),
                    source: t.source,
                    fixture_name: Some(f.name.clone()),
                    download_url: download_url(public_base_url, &t.pdf_file),
                });
            }
        }
    }

    for t in chain_price_tag::find_by_chain(pool, s.chain).await? {
        if device_names.contains(&t.name) && seen.insert(t.name.clone()) {
            tags.push(PublicPriceTag {
                download_url: download_url(public_base_url, &t.pdf_file),
                name: t.name,
                source: t.source,
                fixture_name: None,
            });
        }
    }

    Ok(PublicPriceTagPage {
        launch_slug: l.slug(),
        launch_name: l.name,
        store_slug: s.slug(),
        store_name: s.name,
        tags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{fixtures, price_tags};
    use crate::test_support::{date, seed_device, seed_store};
    use shared::models::{Chain, DeviceKind, FixtureCreate, PlacedDeviceInput, StoreCategory};

    fn new_launch(name: &str, device_ids: Vec<i64>) -> LaunchCreate {
        LaunchCreate {
            name: name.into(),
            description: None,
            dates: vec![date("2026-10-23"), date("2026-10-21"), date("2026-10-23")],
            device_ids,
        }
    }

    async fn fixture_with(pool: &SqlitePool, name: &str, device_id: i64) -> i64 {
        fixtures::create(
            pool,
            FixtureCreate {
                name: name.into(),
                fixture_type: Default::default(),
                devices: vec![PlacedDeviceInput {
                    device_id,
                    position: 1,
                    color: None,
                    quantity: 1,
                }],
                notes: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_create_normalizes_and_checks_devices() {
        let pool = crate::db::test_pool().await;
        let l = create(&pool, new_launch("Lancio Autunno", vec![])).await.unwrap();
        assert_eq!(l.status, LaunchStatus::Draft);
        assert_eq!(l.dates, vec![date("2026-10-21"), date("2026-10-23")]);

        let err = create(&pool, new_launch("Bad", vec![404])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DeviceNotFound);
    }

    #[tokio::test]
    async fn test_status_transitions_and_editability() {
        let pool = crate::db::test_pool().await;
        let l = create(&pool, new_launch("Lancio", vec![])).await.unwrap();

        let err = change_status(&pool, l.id, LaunchStatus::Completed).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::LaunchInvalidTransition);

        change_status(&pool, l.id, LaunchStatus::Opened).await.unwrap();
        let done = change_status(&pool, l.id, LaunchStatus::Completed).await.unwrap();
        assert_eq!(done.status, LaunchStatus::Completed);

        let err = set_dates(&pool, l.id, vec![date("2026-11-02")]).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::LaunchNotEditable);
        let err = queue_impacted(&pool, l.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::LaunchNotEditable);
    }

    #[tokio::test]
    async fn test_impacted_stores_and_queue() {
        let pool = crate::db::test_pool().await;
        let phone = seed_device(&pool, "iPhone 17", DeviceKind::Iphone).await;
        let mac = seed_device(&pool, "MacBook Air", DeviceKind::Mac).await;
        let s1 = seed_store(&pool, "MW Milano", StoreCategory::White, Chain::Mediaworld).await;
        let s2 = seed_store(&pool, "MW Roma", StoreCategory::Tier2, Chain::Mediaworld).await;
        let s3 = seed_store(&pool, "Comet Parma", StoreCategory::White, Chain::Comet).await;

        let f_phone = fixture_with(&pool, "Banco iPhone", phone.id).await;
        let f_mac = fixture_with(&pool, "Banco Mac", mac.id).await;
        fixtures::attach(&pool, s1.id, f_phone).await.unwrap();
        fixtures::attach(&pool, s2.id, f_phone).await.unwrap();
        fixtures::attach(&pool, s3.id, f_mac).await.unwrap();

        let l = create(&pool, new_launch("iPhone 17", vec![phone.id])).await.unwrap();
        let impacted: Vec<i64> = impacted_stores(&pool, l.id).await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(impacted.len(), 2);
        assert!(impacted.contains(&s1.id) && impacted.contains(&s2.id));

        let first = queue_impacted(&pool, l.id).await.unwrap();
        assert_eq!(first, ImportSummary { inserted: 2, skipped: 0 });
        let second = queue_impacted(&pool, l.id).await.unwrap();
        assert_eq!(second, ImportSummary { inserted: 0, skipped: 2 });

        let pending = pending_visit::find_details(&pool, Some(l.id)).await.unwrap();
        let roma = pending.iter().find(|p| p.store_id == s2.id).unwrap();
        assert_eq!(roma.visit_type, StoreCategory::Tier2);
        assert!(pending_visit::find_details(&pool, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_public_price_tag_page() {
        let pool = crate::db::test_pool().await;
        let phone = seed_device(&pool, "iPhone 17 Pro", DeviceKind::Iphone).await;
        let s = seed_store(&pool, "MediaWorld Milano Certosa", StoreCategory::White, Chain::Mediaworld).await;
        let f = fixture_with(&pool, "Banco iPhone", phone.id).await;
        fixtures::attach(&pool, s.id, f).await.unwrap();
        fixtures::set_tag_pdf(&pool, f, "iPhone 17 Pro", "abc.pdf").await.unwrap();
        price_tags::add_chain_tag(&pool, Chain::Mediaworld, "Promo Natale").await.unwrap();

        create(&pool, new_launch("Lancio iPhone 17", vec![phone.id])).await.unwrap();

        let page = public_price_tags(
            &pool,
            "lancio-iphone-17",
            "mediaworld-milano-certosa",
            "https://ops.example",
        )
        .await
        .unwrap();
        assert_eq!(page.store_name, "MediaWorld Milano Certosa");
        assert_eq!(page.tags.len(), 1);
        assert_eq!(page.tags[0].name, "iPhone 17 Pro");
        assert_eq!(page.tags[0].fixture_name.as_deref(), Some("Banco iPhone"));
        assert_eq!(
            page.tags[0].download_url.as_deref(),
            Some("https://ops.example/api/files/price-tags/abc.pdf")
        );

        let err = public_price_tags(&pool, "lancio-iphone-17", "nowhere", "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreNotFound);
        let err = public_price_tags(&pool, "missing", "mediaworld-milano-certosa", "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::LaunchNotFound);
    }

    #[tokio::test]
    async fn test_public_page_keeps_chain_tag_after_device_rename() {
        let pool = crate::db::test_pool().await;
        let mac = seed_device(&pool, "MacBook Air", DeviceKind::Mac).await;
        let s = seed_store(&pool, "Comet Bologna", StoreCategory::White, Chain::Comet).await;
        let f = fixture_with(&pool, "Tavolo Mac", mac.id).await;
        fixtures::attach(&pool, s.id, f).await.unwrap();
        price_tags::add_chain_tag(&pool, Chain::Comet, "MacBook Air").await.unwrap();
        create(&pool, new_launch("Lancio Mac", vec![mac.id])).await.unwrap();

        crate::services::catalog::update_device(
            &pool,
            mac.id,
            shared::models::DeviceUpdate {
                name: Some("MacBook Air 15".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let page = public_price_tags(&pool, "lancio-mac", "comet-bologna", "").await.unwrap();
        let names: Vec<&str> = page.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["MacBook Air"]);
        assert!(page.tags[0].fixture_name.is_none());
    }
}
