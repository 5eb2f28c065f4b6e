//! Visit Repository
//!
//! Scheduling context is matched with `launch_id IS ?` so that a NULL
//! binding selects the global board.

use super::RepoResult;
use chrono::NaiveDate;
use shared::models::{StoreCategory, Visit, VisitDetail, VisitStatus, VisitUpdate};
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, store_id, launch_id, scheduled_date, visit_type, status, tactician_id, notes, created_at, updated_at FROM visits";

const RETURNING: &str = "RETURNING id, store_id, launch_id, scheduled_date, visit_type, status, tactician_id, notes, created_at, updated_at";

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(ex: E, id: i64) -> RepoResult<Option<Visit>> {
    let visit = sqlx::query_as::<_, Visit>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(visit)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Visit>> {
    let visits = sqlx::query_as::<_, Visit>(&format!("{SELECT} ORDER BY scheduled_date, id"))
        .fetch_all(pool)
        .await?;
    Ok(visits)
}

/// All visits of a store in one scheduling context
pub async fn find_for_store<'e, E: SqliteExecutor<'e>>(
    ex: E,
    store_id: i64,
    launch_id: Option<i64>,
) -> RepoResult<Vec<Visit>> {
    let visits = sqlx::query_as::<_, Visit>(&format!(
        "{SELECT} WHERE store_id = ? AND launch_id IS ? ORDER BY scheduled_date, id"
    ))
    .bind(store_id)
    .bind(launch_id)
    .fetch_all(ex)
    .await?;
    Ok(visits)
}

/// The scheduled visit of a store in a context, if any
pub async fn find_scheduled_for_store<'e, E: SqliteExecutor<'e>>(
    ex: E,
    store_id: i64,
    launch_id: Option<i64>,
) -> RepoResult<Option<Visit>> {
    let visit = sqlx::query_as::<_, Visit>(&format!(
        "{SELECT} WHERE store_id = ? AND launch_id IS ? AND status = 'scheduled' LIMIT 1"
    ))
    .bind(store_id)
    .bind(launch_id)
    .fetch_optional(ex)
    .await?;
    Ok(visit)
}

/// Visits joined with their store, `start..=end`, for one context
pub async fn find_details_in_range(
    pool: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
    launch_id: Option<i64>,
) -> RepoResult<Vec<VisitDetail>> {
    let visits = sqlx::query_as::<_, VisitDetail>(
        "SELECT v.id, v.store_id, v.launch_id, v.scheduled_date, v.visit_type, v.status, v.tactician_id, v.notes, s.name AS store_name, s.city AS store_city, s.chain FROM visits v JOIN stores s ON s.id = v.store_id WHERE v.scheduled_date >= ? AND v.scheduled_date <= ? AND v.launch_id IS ? ORDER BY v.scheduled_date, s.name",
    )
    .bind(start)
    .bind(end)
    .bind(launch_id)
    .fetch_all(pool)
    .await?;
    Ok(visits)
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    ex: E,
    store_id: i64,
    launch_id: Option<i64>,
    scheduled_date: NaiveDate,
    visit_type: StoreCategory,
    tactician_id: Option<i64>,
) -> RepoResult<Visit> {
    let now = shared::util::now_millis();
    let visit = sqlx::query_as::<_, Visit>(&format!(
        "INSERT INTO visits (id, store_id, launch_id, scheduled_date, visit_type, status, tactician_id, notes, created_at, updated_at) VALUES (?, ?, ?, ?, ?, 'scheduled', ?, NULL, ?, ?) {RETURNING}"
    ))
    .bind(shared::util::snowflake_id())
    .bind(store_id)
    .bind(launch_id)
    .bind(scheduled_date)
    .bind(visit_type)
    .bind(tactician_id)
    .bind(now)
    .bind(now)
    .fetch_one(ex)
    .await?;
    Ok(visit)
}

pub async fn insert_row<'e, E: SqliteExecutor<'e>>(ex: E, v: &Visit) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO visits (id, store_id, launch_id, scheduled_date, visit_type, status, tactician_id, notes, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(v.id)
    .bind(v.store_id)
    .bind(v.launch_id)
    .bind(v.scheduled_date)
    .bind(v.visit_type)
    .bind(v.status)
    .bind(v.tactician_id)
    .bind(&v.notes)
    .bind(v.created_at)
    .bind(v.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

/// Move a scheduled visit to another date
pub async fn update_date(pool: &SqlitePool, id: i64, date: NaiveDate) -> RepoResult<Option<Visit>> {
    let visit = sqlx::query_as::<_, Visit>(&format!(
        "UPDATE visits SET scheduled_date = ?, updated_at = ? WHERE id = ? AND status = 'scheduled' {RETURNING}"
    ))
    .bind(date)
    .bind(shared::util::now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(visit)
}

pub async fn update(pool: &SqlitePool, id: i64, data: VisitUpdate) -> RepoResult<Option<Visit>> {
    let visit = sqlx::query_as::<_, Visit>(&format!(
        "UPDATE visits SET tactician_id = COALESCE(?1, tactician_id), notes = COALESCE(?2, notes), updated_at = ?3 WHERE id = ?4 {RETURNING}"
    ))
    .bind(data.tactician_id)
    .bind(data.notes)
    .bind(shared::util::now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(visit)
}

/// Status change guarded by the expected current status
pub async fn set_status(
    pool: &SqlitePool,
    id: i64,
    from: VisitStatus,
    to: VisitStatus,
) -> RepoResult<Option<Visit>> {
    let visit = sqlx::query_as::<_, Visit>(&format!(
        "UPDATE visits SET status = ?, updated_at = ? WHERE id = ? AND status = ? {RETURNING}"
    ))
    .bind(to)
    .bind(shared::util::now_millis())
    .bind(id)
    .bind(from)
    .fetch_optional(pool)
    .await?;
    Ok(visit)
}

pub async fn delete<'e, E: SqliteExecutor<'e>>(ex: E, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM visits WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Mark every scheduled visit dated before `today` as completed.
///
/// Cancelled and completed rows are never touched.
pub async fn complete_expired(pool: &SqlitePool, today: NaiveDate) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE visits SET status = 'completed', updated_at = ? WHERE status = 'scheduled' AND scheduled_date < ?",
    )
    .bind(shared::util::now_millis())
    .bind(today)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
