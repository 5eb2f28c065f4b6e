//! Calendar API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::visit;
use crate::services::scheduling;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{MoveVisit, PendingStoreVisit, SweepReport, Visit, VisitUpdate, WeekView};

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    /// Any day of the wanted week; defaults to today
    pub date: Option<NaiveDate>,
    pub launch_id: Option<i64>,
}

/// GET /api/calendar/week?date=&launch_id= - Monday-based week plus the pending queue
pub async fn week(
    State(state): State<ServerState>,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<WeekView>> {
    let today = state.today();
    let view = scheduling::week_view(
        &state.pool,
        query.date.unwrap_or(today),
        query.launch_id,
        today,
    )
    .await?;
    Ok(Json(view))
}

/// GET /api/visits/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Visit>> {
    let visit = visit::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::VisitNotFound).with_detail("id", id))?;
    Ok(Json(visit))
}

/// PUT /api/visits/{id} - tactician and notes
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<VisitUpdate>,
) -> AppResult<Json<Visit>> {
    Ok(Json(scheduling::update_visit(&state.pool, id, payload).await?))
}

/// DELETE /api/visits/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    scheduling::delete_visit(&state.pool, id).await?;
    Ok(Json(true))
}

/// POST /api/visits/{id}/move
pub async fn move_visit(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MoveVisit>,
) -> AppResult<Json<Visit>> {
    let visit = scheduling::move_visit(&state.pool, id, payload.date, state.today()).await?;
    Ok(Json(visit))
}

/// POST /api/visits/{id}/unschedule - back to the pending queue
pub async fn unschedule(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PendingStoreVisit>> {
    Ok(Json(scheduling::unschedule_visit(&state.pool, id).await?))
}

/// POST /api/visits/{id}/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Visit>> {
    Ok(Json(scheduling::cancel_visit(&state.pool, id).await?))
}

/// POST /api/visits/sweep - complete every past scheduled visit now
pub async fn sweep(State(state): State<ServerState>) -> AppResult<Json<SweepReport>> {
    Ok(Json(
        scheduling::sweep_expired(&state.pool, state.today()).await?,
    ))
}
