//! Device Repository

use super::RepoResult;
use shared::models::{Device, DeviceCreate, DeviceUpdate};
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, name, kind, color, is_active, created_at, updated_at FROM devices";

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(ex: E, id: i64) -> RepoResult<Option<Device>> {
    let device = sqlx::query_as::<_, Device>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(device)
}

pub async fn find_all(pool: &SqlitePool, active_only: bool) -> RepoResult<Vec<Device>> {
    let devices = sqlx::query_as::<_, Device>(&format!(
        "{SELECT} WHERE (?1 = 0 OR is_active = 1) ORDER BY kind, name"
    ))
    .bind(active_only)
    .fetch_all(pool)
    .await?;
    Ok(devices)
}

pub async fn find_by_ids(pool: &SqlitePool, ids: &[i64]) -> RepoResult<Vec<Device>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let devices = sqlx::query_as::<_, Device>(&format!(
        "{SELECT} WHERE id IN (SELECT value FROM json_each(?)) ORDER BY name"
    ))
    .bind(sqlx::types::Json(ids))
    .fetch_all(pool)
    .await?;
    Ok(devices)
}

pub async fn create(pool: &SqlitePool, data: DeviceCreate) -> RepoResult<Device> {
    let now = shared::util::now_millis();
    let device = sqlx::query_as::<_, Device>(
        "INSERT INTO devices (id, name, kind, color, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, 1, ?, ?) RETURNING id, name, kind, color, is_active, created_at, updated_at",
    )
    .bind(shared::util::snowflake_id())
    .bind(data.name.trim())
    .bind(data.kind)
    .bind(data.color)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(device)
}

pub async fn insert_row<'e, E: SqliteExecutor<'e>>(ex: E, d: &Device) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO devices (id, name, kind, color, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(d.id)
    .bind(&d.name)
    .bind(d.kind)
    .bind(&d.color)
    .bind(d.is_active)
    .bind(d.created_at)
    .bind(d.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn update(pool: &SqlitePool, id: i64, data: DeviceUpdate) -> RepoResult<Option<Device>> {
    let now = shared::util::now_millis();
    let device = sqlx::query_as::<_, Device>(
        "UPDATE devices SET name = COALESCE(?1, name), kind = COALESCE(?2, kind), color = COALESCE(?3, color), is_active = COALESCE(?4, is_active), updated_at = ?5 WHERE id = ?6 RETURNING id, name, kind, color, is_active, created_at, updated_at",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.kind)
    .bind(data.color)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(device)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM devices WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Number of fixtures that place this device
pub async fn count_fixture_usage(pool: &SqlitePool, id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM fixtures f WHERE EXISTS (SELECT 1 FROM json_each(f.devices) d WHERE json_extract(d.value, '$.device_id') = ?)",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Number of launches that select this device
pub async fn count_launch_usage(pool: &SqlitePool, id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM launches l WHERE EXISTS (SELECT 1 FROM json_each(l.device_ids) d WHERE d.value = ?)",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}
