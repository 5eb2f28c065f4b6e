//! Fixture (display table) service
//!
//! Every change to a fixture's devices, manual tags or store attachments
//! re-derives its tag list and reconciles the chains it is attached to.

use std::collections::HashSet;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    ChainSyncReport, Fixture, FixtureCreate, FixtureUpdate, PlacedDevice, PlacedDeviceInput,
    PriceTagDescriptor, PriceTagSource,
};
use sqlx::SqlitePool;

use crate::db::repository::{device, fixture, store};
use crate::services::price_tags;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::FixtureNotFound).with_detail("id", id)
}

pub async fn load(pool: &SqlitePool, id: i64) -> AppResult<Fixture> {
    fixture::find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

/// Validate placement input and snapshot device name, kind and color
pub async fn resolve_devices(
    pool: &SqlitePool,
    inputs: &[PlacedDeviceInput],
) -> AppResult<Vec<PlacedDevice>> {
    let mut positions = HashSet::new();
    let mut placed = Vec::with_capacity(inputs.len());

    for input in inputs {
        if input.quantity < 1 {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                "Device quantity must be at least 1",
            )
            .with_detail("device_id", input.device_id)
            .with_detail("quantity", input.quantity));
        }
        if !positions.insert(input.position) {
            return Err(AppError::new(ErrorCode::DuplicateDevicePosition)
                .with_detail("position", input.position));
        }
        validate_optional_text(&input.color, "color", MAX_SHORT_TEXT_LEN)?;

        let d = device::find_by_id(pool, input.device_id).await?.ok_or_else(|| {
            AppError::new(ErrorCode::DeviceNotFound).with_detail("device_id", input.device_id)
        })?;
        placed.push(PlacedDevice {
            device_id: d.id,
            name: d.name,
            kind: d.kind,
            position: input.position,
            color: input.color.clone().or(d.color),
            quantity: input.quantity,
        });
    }

    placed.sort_by_key(|p| p.position);
    Ok(placed)
}

async fn resync_chains_of(pool: &SqlitePool, fixture_id: i64) -> AppResult<Vec<ChainSyncReport>> {
    let chains = fixture::chains_for_fixture(pool, fixture_id).await?;
    price_tags::sync_chains(pool, chains).await
}

pub async fn create(pool: &SqlitePool, data: FixtureCreate) -> AppResult<Fixture> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;

    let devices = resolve_devices(pool, &data.devices).await?;
    let tags = price_tags::derive_fixture_tags(&devices, &[]);
    let created =
        fixture::create(pool, &data.name, data.fixture_type, &devices, &tags, data.notes).await?;

    tracing::info!(fixture_id = created.id, devices = devices.len(), "Table created");
    Ok(created)
}

pub async fn update(pool: &SqlitePool, id: i64, data: FixtureUpdate) -> AppResult<Fixture> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    fixture::update(pool, id, data).await?.ok_or_else(|| not_found(id))
}

/// Replace the device list, re-derive tags and reconcile attached chains
pub async fn replace_devices(
    pool: &SqlitePool,
    id: i64,
    inputs: &[PlacedDeviceInput],
) -> AppResult<Fixture> {
    let current = load(pool, id).await?;
    let devices = resolve_devices(pool, inputs).await?;
    let tags = price_tags::derive_fixture_tags(&devices, &current.price_tags);

    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;
    fixture::set_devices(&mut *tx, id, &devices).await?;
    fixture::set_price_tags(&mut *tx, id, &tags).await?;
    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    resync_chains_of(pool, id).await?;
    load(pool, id).await
}

async fn store_tags(
    pool: &SqlitePool,
    id: i64,
    tags: Vec<PriceTagDescriptor>,
    devices: &[PlacedDevice],
) -> AppResult<Fixture> {
    let derived = price_tags::derive_fixture_tags(devices, &tags);
    fixture::set_price_tags(pool, id, &derived).await?;
    resync_chains_of(pool, id).await?;
    load(pool, id).await
}

/// Add a manual tag. It shadows an auto tag of the same name.
pub async fn add_manual_tag(pool: &SqlitePool, id: i64, name: &str) -> AppResult<Fixture> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    let name = name.trim();
    let current = load(pool, id).await?;

    if current
        .price_tags
        .iter()
        .any(|t| t.source == PriceTagSource::Manual && t.name == name)
    {
        return Err(AppError::new(ErrorCode::PriceTagNameExists).with_detail("name", name));
    }

    let mut tags = current.price_tags.clone();
    tags.retain(|t| !(t.source == PriceTagSource::Auto && t.name == name));
    tags.push(PriceTagDescriptor {
        name: name.to_string(),
        source: PriceTagSource::Manual,
        device_id: None,
        pdf_file: None,
    });
    store_tags(pool, id, tags, &current.devices).await
}

/// Remove a manual tag; auto tags cannot be removed directly
pub async fn remove_manual_tag(pool: &SqlitePool, id: i64, name: &str) -> AppResult<Fixture> {
    let current = load(pool, id).await?;
    let before = current.price_tags.len();

    let mut tags = current.price_tags.clone();
    tags.retain(|t| !(t.source == PriceTagSource::Manual && t.name == name));
    if tags.len() == before {
        return Err(AppError::new(ErrorCode::PriceTagNotFound)
            .with_detail("fixture_id", id)
            .with_detail("name", name));
    }
    store_tags(pool, id, tags, &current.devices).await
}

/// Attach an uploaded PDF to one of the fixture's tags
pub async fn set_tag_pdf(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    file_name: &str,
) -> AppResult<Fixture> {
    let current = load(pool, id).await?;
    let mut tags = current.price_tags;
    let tag = tags.iter_mut().find(|t| t.name == name).ok_or_else(|| {
        AppError::new(ErrorCode::PriceTagNotFound)
            .with_detail("fixture_id", id)
            .with_detail("name", name)
    })?;
    tag.pdf_file = Some(file_name.to_string());

    fixture::set_price_tags(pool, id, &tags).await?;
    load(pool, id).await
}

pub async fn attach(pool: &SqlitePool, store_id: i64, fixture_id: i64) -> AppResult<ChainSyncReport> {
    let s = store::find_by_id(pool, store_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound).with_detail("store_id", store_id))?;
    load(pool, fixture_id).await?;

    if fixture::is_attached(pool, store_id, fixture_id).await? {
        return Err(AppError::new(ErrorCode::FixtureAlreadyAttached)
            .with_detail("store_id", store_id)
            .with_detail("fixture_id", fixture_id));
    }
    fixture::attach(pool, store_id, fixture_id).await?;
    tracing::info!(store_id, fixture_id, "Table attached to store");

    price_tags::sync_chain(pool, s.chain).await
}

pub async fn detach(pool: &SqlitePool, store_id: i64, fixture_id: i64) -> AppResult<ChainSyncReport> {
    let s = store::find_by_id(pool, store_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound).with_detail("store_id", store_id))?;

    if !fixture::detach(pool, store_id, fixture_id).await? {
        return Err(AppError::new(ErrorCode::FixtureNotAttached)
            .with_detail("store_id", store_id)
            .with_detail("fixture_id", fixture_id));
    }
    tracing::info!(store_id, fixture_id, "Table detached from store");

    price_tags::sync_chain(pool, s.chain).await
}

/// Delete a fixture and reconcile the chains it was attached to
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let chains = fixture::chains_for_fixture(pool, id).await?;
    if !fixture::delete(pool, id).await? {
        return Err(not_found(id));
    }
    price_tags::sync_chains(pool, chains).await?;
    Ok(())
}
