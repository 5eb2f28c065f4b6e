//! Pending queue API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::services::scheduling;
use crate::utils::AppResult;
use shared::models::{
    ImportSummary, PendingImportCategory, PendingImportOne, PendingStoreVisit, PendingVisitDetail,
    ScheduleContext, SchedulePending, Visit,
};

/// GET /api/pending?launch_id=
pub async fn list(
    State(state): State<ServerState>,
    Query(ctx): Query<ScheduleContext>,
) -> AppResult<Json<Vec<PendingVisitDetail>>> {
    Ok(Json(scheduling::list_pending(&state.pool, ctx.launch_id).await?))
}

/// POST /api/pending/import - queue every store of a category
pub async fn import_category(
    State(state): State<ServerState>,
    Json(payload): Json<PendingImportCategory>,
) -> AppResult<Json<ImportSummary>> {
    let summary =
        scheduling::import_category(&state.pool, payload.category, payload.launch_id).await?;
    Ok(Json(summary))
}

/// POST /api/pending - queue one store
pub async fn import_one(
    State(state): State<ServerState>,
    Json(payload): Json<PendingImportOne>,
) -> AppResult<Json<PendingStoreVisit>> {
    let pending = scheduling::import_one(
        &state.pool,
        payload.store_id,
        payload.visit_type,
        payload.launch_id,
    )
    .await?;
    Ok(Json(pending))
}

/// DELETE /api/pending/{id}
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    scheduling::remove_pending(&state.pool, id).await?;
    Ok(Json(true))
}

/// DELETE /api/pending?launch_id= - empty the queue of a context, returns rows removed
pub async fn clear(
    State(state): State<ServerState>,
    Query(ctx): Query<ScheduleContext>,
) -> AppResult<Json<u64>> {
    Ok(Json(scheduling::clear_pending(&state.pool, ctx.launch_id).await?))
}

/// POST /api/pending/{id}/schedule - drop a pending item on a weekday
pub async fn schedule(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SchedulePending>,
) -> AppResult<Json<Visit>> {
    let visit = scheduling::schedule_pending(
        &state.pool,
        id,
        payload.date,
        payload.tactician_id,
        state.today(),
    )
    .await?;
    Ok(Json(visit))
}
