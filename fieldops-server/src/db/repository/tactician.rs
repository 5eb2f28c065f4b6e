//! Tactician Repository

use super::RepoResult;
use shared::models::{Tactician, TacticianCreate, TacticianUpdate};
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, name, email, phone, region, is_active, created_at FROM tacticians";

pub async fn find_by_id<'e, E: SqliteExecutor<'e>>(ex: E, id: i64) -> RepoResult<Option<Tactician>> {
    let tactician = sqlx::query_as::<_, Tactician>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(tactician)
}

pub async fn find_all(pool: &SqlitePool, active_only: bool) -> RepoResult<Vec<Tactician>> {
    let tacticians = sqlx::query_as::<_, Tactician>(&format!(
        "{SELECT} WHERE (?1 = 0 OR is_active = 1) ORDER BY name"
    ))
    .bind(active_only)
    .fetch_all(pool)
    .await?;
    Ok(tacticians)
}

pub async fn create(pool: &SqlitePool, data: TacticianCreate) -> RepoResult<Tactician> {
    let tactician = sqlx::query_as::<_, Tactician>(
        "INSERT INTO tacticians (id, name, email, phone, region, is_active, created_at) VALUES (?, ?, ?, ?, ?, 1, ?) RETURNING id, name, email, phone, region, is_active, created_at",
    )
    .bind(shared::util::snowflake_id())
    .bind(data.name.trim())
    .bind(data.email)
    .bind(data.phone)
    .bind(data.region)
    .bind(shared::util::now_millis())
    .fetch_one(pool)
    .await?;
    Ok(tactician)
}

pub async fn insert_row<'e, E: SqliteExecutor<'e>>(ex: E, t: &Tactician) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO tacticians (id, name, email, phone, region, is_active, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(t.id)
    .bind(&t.name)
    .bind(&t.email)
    .bind(&t.phone)
    .bind(&t.region)
    .bind(t.is_active)
    .bind(t.created_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn update(pool: &SqlitePool, id: i64, data: TacticianUpdate) -> RepoResult<Option<Tactician>> {
    let tactician = sqlx::query_as::<_, Tactician>(
        "UPDATE tacticians SET name = COALESCE(?1, name), email = COALESCE(?2, email), phone = COALESCE(?3, phone), region = COALESCE(?4, region), is_active = COALESCE(?5, is_active) WHERE id = ?6 RETURNING id, name, email, phone, region, is_active, created_at",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.email)
    .bind(data.phone)
    .bind(data.region)
    .bind(data.is_active)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(tactician)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM tacticians WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
