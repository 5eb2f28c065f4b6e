//! Training session API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::training;
use crate::services::trainings;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{TrainingCreate, TrainingDetail, TrainingSession, TrainingUpdate};

/// Inclusive date range
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// GET /api/trainings?start_date=&end_date=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<Vec<TrainingDetail>>> {
    if query.end_date < query.start_date {
        return Err(AppError::validation("end_date must not be before start_date"));
    }
    let sessions =
        training::find_details_in_range(&state.pool, query.start_date, query.end_date).await?;
    Ok(Json(sessions))
}

/// POST /api/trainings
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TrainingCreate>,
) -> AppResult<Json<TrainingSession>> {
    Ok(Json(trainings::create(&state.pool, payload).await?))
}

/// GET /api/trainings/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TrainingSession>> {
    let session = training::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::TrainingNotFound).with_detail("id", id))?;
    Ok(Json(session))
}

/// PUT /api/trainings/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TrainingUpdate>,
) -> AppResult<Json<TrainingSession>> {
    Ok(Json(trainings::update(&state.pool, id, payload).await?))
}

/// DELETE /api/trainings/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    trainings::delete(&state.pool, id).await?;
    Ok(Json(true))
}
