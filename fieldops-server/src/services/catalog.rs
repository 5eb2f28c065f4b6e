//! Store and device catalog rules that reach beyond a single row

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Device, DeviceCreate, DeviceUpdate, Store, StoreCreate, StoreUpdate};
use sqlx::SqlitePool;

use crate::db::repository::{device, store};
use crate::services::price_tags;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_email,
    validate_optional_text, validate_required_text,
};

fn validate_store_fields(
    address: &Option<String>,
    city: &Option<String>,
    province: &Option<String>,
    phone: &Option<String>,
    email: &Option<String>,
    manager_name: &Option<String>,
    notes: &Option<String>,
) -> AppResult<()> {
    validate_optional_text(address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(city, "city", MAX_NAME_LEN)?;
    validate_optional_text(province, "province", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_email(email, "email")?;
    validate_optional_text(manager_name, "manager_name", MAX_NAME_LEN)?;
    validate_optional_text(notes, "notes", MAX_NOTE_LEN)?;
    Ok(())
}

pub async fn create_store(pool: &SqlitePool, data: StoreCreate) -> AppResult<Store> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_store_fields(
        &data.address,
        &data.city,
        &data.province,
        &data.phone,
        &data.email,
        &data.manager_name,
        &data.notes,
    )?;
    let created = store::create(pool, data).await?;
    tracing::info!(store_id = created.id, chain = %created.chain, "Store created");
    Ok(created)
}

/// Update a store; a chain change reconciles both the old and new chain
pub async fn update_store(pool: &SqlitePool, id: i64, data: StoreUpdate) -> AppResult<Store> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_store_fields(
        &data.address,
        &data.city,
        &data.province,
        &data.phone,
        &data.email,
        &data.manager_name,
        &data.notes,
    )?;

    let before = store::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound).with_detail("id", id))?;
    let after = store::update(pool, id, data)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound).with_detail("id", id))?;

    if before.chain != after.chain {
        tracing::info!(store_id = id, from = %before.chain, to = %after.chain, "Store changed chain");
        price_tags::sync_chains(pool, [before.chain, after.chain]).await?;
    }
    Ok(after)
}

/// Delete a store. Its pending rows, visits, trainings and fixture
/// attachments cascade; the chain catalog is reconciled afterwards.
pub async fn delete_store(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let existing = store::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound).with_detail("id", id))?;
    store::delete(pool, id).await?;
    price_tags::sync_chain(pool, existing.chain).await?;
    tracing::info!(store_id = id, "Store deleted");
    Ok(())
}

pub async fn create_device(pool: &SqlitePool, data: DeviceCreate) -> AppResult<Device> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&data.color, "color", MAX_SHORT_TEXT_LEN)?;
    Ok(device::create(pool, data).await?)
}

/// Placed devices keep the name and kind they had when placed
pub async fn update_device(pool: &SqlitePool, id: i64, data: DeviceUpdate) -> AppResult<Device> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.color, "color", MAX_SHORT_TEXT_LEN)?;
    device::update(pool, id, data)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DeviceNotFound).with_detail("id", id))
}

/// Refuse to delete a device still placed on a table or selected by a launch
pub async fn delete_device(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let fixtures = device::count_fixture_usage(pool, id).await?;
    let launches = device::count_launch_usage(pool, id).await?;
    if fixtures > 0 || launches > 0 {
        return Err(AppError::new(ErrorCode::DeviceInUse)
            .with_detail("id", id)
            .with_detail("fixtures", fixtures)
            .with_detail("launches", launches));
    }
    if !device::delete(pool, id).await? {
        return Err(AppError::new(ErrorCode::DeviceNotFound).with_detail("id", id));
    }
    Ok(())
}
