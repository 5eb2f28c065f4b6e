//! Pending store visit Repository (the scheduling inbox)

use super::RepoResult;
use shared::models::{PendingStoreVisit, PendingVisitDetail, StoreCategory};
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, store_id, launch_id, visit_type, created_at FROM pending_store_visits";

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(
    ex: E,
    id: i64,
) -> RepoResult<Option<PendingStoreVisit>> {
    let pending = sqlx::query_as::<_, PendingStoreVisit>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(pending)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<PendingStoreVisit>> {
    let rows = sqlx::query_as::<_, PendingStoreVisit>(&format!("{SELECT} ORDER BY created_at, id"))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// The pending row of a store in a context, if any
pub async fn find_for_store<'e, E: SqliteExecutor<'e>>(
    ex: E,
    store_id: i64,
    launch_id: Option<i64>,
) -> RepoResult<Option<PendingStoreVisit>> {
    let pending = sqlx::query_as::<_, PendingStoreVisit>(&format!(
        "{SELECT} WHERE store_id = ? AND launch_id IS ? LIMIT 1"
    ))
    .bind(store_id)
    .bind(launch_id)
    .fetch_optional(ex)
    .await?;
    Ok(pending)
}

/// Pending queue of a context joined with store data
pub async fn find_details<'e, E: SqliteExecutor<'e>>(
    ex: E,
    launch_id: Option<i64>,
) -> RepoResult<Vec<PendingVisitDetail>> {
    let rows = sqlx::query_as::<_, PendingVisitDetail>(
        "SELECT p.id, p.store_id, p.launch_id, p.visit_type, p.created_at, s.name AS store_name, s.city AS store_city, s.chain FROM pending_store_visits p JOIN stores s ON s.id = p.store_id WHERE p.launch_id IS ? ORDER BY s.name, p.id",
    )
    .bind(launch_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Store ids that are either pending or have a scheduled visit in the context
pub async fn occupied_store_ids<'e, E: SqliteExecutor<'e>>(
    ex: E,
    launch_id: Option<i64>,
) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT store_id FROM pending_store_visits WHERE launch_id IS ?1 UNION SELECT store_id FROM visits WHERE launch_id IS ?1 AND status = 'scheduled'",
    )
    .bind(launch_id)
    .fetch_all(ex)
    .await?;
    Ok(ids)
}

pub async fn insert<'e, E: SqliteExecutor<'e>>(
    ex: E,
    store_id: i64,
    launch_id: Option<i64>,
    visit_type: StoreCategory,
) -> RepoResult<PendingStoreVisit> {
    let pending = sqlx::query_as::<_, PendingStoreVisit>(
        "INSERT INTO pending_store_visits (id, store_id, launch_id, visit_type, created_at) VALUES (?, ?, ?, ?, ?) RETURNING id, store_id, launch_id, visit_type, created_at",
    )
    .bind(shared::util::snowflake_id())
    .bind(store_id)
    .bind(launch_id)
    .bind(visit_type)
    .bind(shared::util::now_millis())
    .fetch_one(ex)
    .await?;
    Ok(pending)
}

pub async fn insert_row<'e, E: SqliteExecutor<'e>>(ex: E, p: &PendingStoreVisit) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO pending_store_visits (id, store_id, launch_id, visit_type, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(p.id)
    .bind(p.store_id)
    .bind(p.launch_id)
    .bind(p.visit_type)
    .bind(p.created_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn delete<'e, E: SqliteExecutor<'e>>(ex: E, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM pending_store_visits WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Empty the queue of one context
pub async fn clear(pool: &SqlitePool, launch_id: Option<i64>) -> RepoResult<u64> {
    let result = sqlx::query("DELETE FROM pending_store_visits WHERE launch_id IS ?")
        .bind(launch_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
