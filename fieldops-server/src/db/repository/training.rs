//! Training session Repository

use super::RepoResult;
use chrono::NaiveDate;
use shared::models::{TrainingCreate, TrainingDetail, TrainingSession};
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, tactician_id, store_id, session_date, start_time, end_time, notes, created_at FROM training_sessions";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<TrainingSession>> {
    let session = sqlx::query_as::<_, TrainingSession>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(session)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<TrainingSession>> {
    let sessions = sqlx::query_as::<_, TrainingSession>(&format!(
        "{SELECT} ORDER BY session_date, start_time, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(sessions)
}

/// Sessions joined with store and tactician names, `start..=end`
pub async fn find_details_in_range(
    pool: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<Vec<TrainingDetail>> {
    let sessions = sqlx::query_as::<_, TrainingDetail>(
        "SELECT t.id, t.tactician_id, t.store_id, t.session_date, t.start_time, t.end_time, t.notes, s.name AS store_name, tc.name AS tactician_name FROM training_sessions t JOIN stores s ON s.id = t.store_id JOIN tacticians tc ON tc.id = t.tactician_id WHERE t.session_date >= ? AND t.session_date <= ? ORDER BY t.session_date, t.start_time",
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(sessions)
}

pub async fn create(pool: &SqlitePool, data: &TrainingCreate) -> RepoResult<TrainingSession> {
    let session = sqlx::query_as::<_, TrainingSession>(
        "INSERT INTO training_sessions (id, tactician_id, store_id, session_date, start_time, end_time, notes, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING id, tactician_id, store_id, session_date, start_time, end_time, notes, created_at",
    )
    .bind(shared::util::snowflake_id())
    .bind(data.tactician_id)
    .bind(data.store_id)
    .bind(data.session_date)
    .bind(&data.start_time)
    .bind(&data.end_time)
    .bind(&data.notes)
    .bind(shared::util::now_millis())
    .fetch_one(pool)
    .await?;
    Ok(session)
}

pub async fn insert_row<'e, E: SqliteExecutor<'e>>(ex: E, t: &TrainingSession) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO training_sessions (id, tactician_id, store_id, session_date, start_time, end_time, notes, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(t.id)
    .bind(t.tactician_id)
    .bind(t.store_id)
    .bind(t.session_date)
    .bind(&t.start_time)
    .bind(&t.end_time)
    .bind(&t.notes)
    .bind(t.created_at)
    .execute(ex)
    .await?;
    Ok(())
}

/// Overwrites every mutable column with the merged session
pub async fn update(pool: &SqlitePool, t: &TrainingSession) -> RepoResult<Option<TrainingSession>> {
    let session = sqlx::query_as::<_, TrainingSession>(
        "UPDATE training_sessions SET tactician_id = ?, store_id = ?, session_date = ?, start_time = ?, end_time = ?, notes = ? WHERE id = ? RETURNING id, tactician_id, store_id, session_date, start_time, end_time, notes, created_at",
    )
    .bind(t.tactician_id)
    .bind(t.store_id)
    .bind(t.session_date)
    .bind(&t.start_time)
    .bind(&t.end_time)
    .bind(&t.notes)
    .bind(t.id)
    .fetch_optional(pool)
    .await?;
    Ok(session)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM training_sessions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
