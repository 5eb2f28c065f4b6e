//! Launch Repository

use super::RepoResult;
use chrono::NaiveDate;
use shared::models::{Launch, LaunchStatus, LaunchUpdate};
use sqlx::types::Json;
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, name, description, status, dates, device_ids, created_at, updated_at FROM launches";

const RETURNING: &str = "RETURNING id, name, description, status, dates, device_ids, created_at, updated_at";

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(ex: E, id: i64) -> RepoResult<Option<Launch>> {
    let launch = sqlx::query_as::<_, Launch>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(launch)
}

/// All launches, oldest first (slug lookups take the first match)
pub async fn find_all(pool: &SqlitePool, status: Option<LaunchStatus>) -> RepoResult<Vec<Launch>> {
    let launches = sqlx::query_as::<_, Launch>(&format!(
        "{SELECT} WHERE (?1 IS NULL OR status = ?1) ORDER BY created_at, id"
    ))
    .bind(status)
    .fetch_all(pool)
    .await?;
    Ok(launches)
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    description: Option<String>,
    dates: &[NaiveDate],
    device_ids: &[i64],
) -> RepoResult<Launch> {
    let now = shared::util::now_millis();
    let launch = sqlx::query_as::<_, Launch>(&format!(
        "INSERT INTO launches (id, name, description, status, dates, device_ids, created_at, updated_at) VALUES (?, ?, ?, 'draft', ?, ?, ?, ?) {RETURNING}"
    ))
    .bind(shared::util::snowflake_id())
    .bind(name.trim())
    .bind(description)
    .bind(Json(dates))
    .bind(Json(device_ids))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(launch)
}

pub async fn insert_row<'e, E: SqliteExecutor<'e>>(ex: E, l: &Launch) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO launches (id, name, description, status, dates, device_ids, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(l.id)
    .bind(&l.name)
    .bind(&l.description)
    .bind(l.status)
    .bind(Json(&l.dates))
    .bind(Json(&l.device_ids))
    .bind(l.created_at)
    .bind(l.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn update(pool: &SqlitePool, id: i64, data: LaunchUpdate) -> RepoResult<Option<Launch>> {
    let launch = sqlx::query_as::<_, Launch>(&format!(
        "UPDATE launches SET name = COALESCE(?1, name), description = COALESCE(?2, description), updated_at = ?3 WHERE id = ?4 {RETURNING}"
    ))
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.description)
    .bind(shared::util::now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(launch)
}

pub async fn set_dates(pool: &SqlitePool, id: i64, dates: &[NaiveDate]) -> RepoResult<Option<Launch>> {
    let launch = sqlx::query_as::<_, Launch>(&format!(
        "UPDATE launches SET dates = ?, updated_at = ? WHERE id = ? {RETURNING}"
    ))
    .bind(Json(dates))
    .bind(shared::util::now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(launch)
}

pub async fn set_devices(pool: &SqlitePool, id: i64, device_ids: &[i64]) -> RepoResult<Option<Launch>> {
    let launch = sqlx::query_as::<_, Launch>(&format!(
        "UPDATE launches SET device_ids = ?, updated_at = ? WHERE id = ? {RETURNING}"
    ))
    .bind(Json(device_ids))
    .bind(shared::util::now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(launch)
}

/// Compare-and-set status change
pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    from: LaunchStatus,
    to: LaunchStatus,
) -> RepoResult<Option<Launch>> {
    let launch = sqlx::query_as::<_, Launch>(&format!(
        "UPDATE launches SET status = ?, updated_at = ? WHERE id = ? AND status = ? {RETURNING}"
    ))
    .bind(to)
    .bind(shared::util::now_millis())
    .bind(id)
    .bind(from)
    .fetch_optional(pool)
    .await?;
    Ok(launch)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM launches WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
