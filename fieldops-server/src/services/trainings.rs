//! Training sessions (read-only on the calendar board)

use chrono::NaiveTime;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{TrainingCreate, TrainingSession, TrainingUpdate};
use sqlx::SqlitePool;

use crate::db::repository::{store, tactician, training};
use crate::utils::time::parse_hm;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};

pub async fn create(pool: &SqlitePool, mut data: TrainingCreate) -> AppResult<TrainingSession> {
    let (start, end) = check_time_range(&data.start_time, &data.end_time)?;
    validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
    ensure_refs(pool, data.tactician_id, data.store_id).await?;

    // Stored canonical so lexical order matches time order
    data.start_time = start.format("%H:%M").to_string();
    data.end_time = end.format("%H:%M").to_string();
    Ok(training::create(pool, &data).await?)
}

/// Partial update; the merged session is validated as a whole
pub async fn update(pool: &SqlitePool, id: i64, data: TrainingUpdate) -> AppResult<TrainingSession> {
    let mut session = training::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TrainingNotFound).with_detail("id", id))?;

    if let Some(tactician_id) = data.tactician_id {
        session.tactician_id = tactician_id;
    }
    if let Some(store_id) = data.store_id {
        session.store_id = store_id;
    }
    if let Some(date) = data.session_date {
        session.session_date = date;
    }
    if let Some(start_time) = data.start_time {
        session.start_time = start_time;
    }
    if let Some(end_time) = data.end_time {
        session.end_time = end_time;
    }
    if data.notes.is_some() {
        session.notes = data.notes;
    }

    let (start, end) = check_time_range(&session.start_time, &session.end_time)?;
    validate_optional_text(&session.notes, "notes", MAX_NOTE_LEN)?;
    ensure_refs(pool, session.tactician_id, session.store_id).await?;
    session.start_time = start.format("%H:%M").to_string();
    session.end_time = end.format("%H:%M").to_string();

    training::update(pool, &session)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TrainingNotFound).with_detail("id", id))
}

fn check_time_range(start_time: &str, end_time: &str) -> AppResult<(NaiveTime, NaiveTime)> {
    let start = parse_hm(start_time, "start_time")?;
    let end = parse_hm(end_time, "end_time")?;
    if end <= start {
        return Err(AppError::new(ErrorCode::InvalidTimeRange)
            .with_detail("start_time", start_time)
            .with_detail("end_time", end_time));
    }
    Ok((start, end))
}

async fn ensure_refs(pool: &SqlitePool, tactician_id: i64, store_id: i64) -> AppResult<()> {
    if tactician::find_by_id(pool, tactician_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::TacticianNotFound).with_detail("tactician_id", tactician_id));
    }
    if store::find_by_id(pool, store_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::StoreNotFound).with_detail("store_id", store_id));
    }
    Ok(())
}

/// Hard delete, no undo
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    if !training::delete(pool, id).await? {
        return Err(AppError::new(ErrorCode::TrainingNotFound).with_detail("id", id));
    }
    Ok(())
}
