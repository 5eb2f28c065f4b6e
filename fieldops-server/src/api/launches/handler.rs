//! Launch API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::launch;
use crate::services::launches;
use crate::utils::AppResult;
use shared::models::{
    ImportSummary, Launch, LaunchCreate, LaunchDatesUpdate, LaunchDevicesUpdate, LaunchStatus,
    LaunchStatusChange, LaunchUpdate, Store,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<LaunchStatus>,
}

/// GET /api/launches
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Launch>>> {
    Ok(Json(launch::find_all(&state.pool, query.status).await?))
}

/// GET /api/launches/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Launch>> {
    Ok(Json(launches::load(&state.pool, id).await?))
}

/// POST /api/launches - created as draft
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<LaunchCreate>,
) -> AppResult<Json<Launch>> {
    Ok(Json(launches::create(&state.pool, payload).await?))
}

/// PUT /api/launches/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<LaunchUpdate>,
) -> AppResult<Json<Launch>> {
    Ok(Json(launches::update(&state.pool, id, payload).await?))
}

/// DELETE /api/launches/{id} - its pending rows and visits go with it
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    launches::delete(&state.pool, id).await?;
    Ok(Json(true))
}

/// PUT /api/launches/{id}/dates - stored sorted and deduplicated
pub async fn set_dates(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<LaunchDatesUpdate>,
) -> AppResult<Json<Launch>> {
    Ok(Json(launches::set_dates(&state.pool, id, payload.dates).await?))
}

/// PUT /api/launches/{id}/devices
pub async fn set_devices(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<LaunchDevicesUpdate>,
) -> AppResult<Json<Launch>> {
    Ok(Json(
        launches::set_devices(&state.pool, id, &payload.device_ids).await?,
    ))
}

/// POST /api/launches/{id}/status
pub async fn change_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<LaunchStatusChange>,
) -> AppResult<Json<Launch>> {
    Ok(Json(
        launches::change_status(&state.pool, id, payload.status).await?,
    ))
}

/// GET /api/launches/{id}/impacted-stores - stores with a fixture holding a launch device
pub async fn impacted_stores(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Store>>> {
    Ok(Json(launches::impacted_stores(&state.pool, id).await?))
}

/// POST /api/launches/{id}/queue-impacted - queue impacted stores in the launch context
pub async fn queue_impacted(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ImportSummary>> {
    Ok(Json(launches::queue_impacted(&state.pool, id).await?))
}
