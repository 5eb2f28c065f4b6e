//! Device API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::device;
use crate::services::catalog;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Device, DeviceCreate, DeviceUpdate};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// GET /api/devices
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Device>>> {
    let devices = device::find_all(&state.pool, query.active_only).await?;
    Ok(Json(devices))
}

/// GET /api/devices/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Device>> {
    let device = device::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::DeviceNotFound).with_detail("id", id))?;
    Ok(Json(device))
}

/// POST /api/devices
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DeviceCreate>,
) -> AppResult<Json<Device>> {
    Ok(Json(catalog::create_device(&state.pool, payload).await?))
}

/// PUT /api/devices/{id} - placed snapshots on fixtures keep the old name
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DeviceUpdate>,
) -> AppResult<Json<Device>> {
    Ok(Json(catalog::update_device(&state.pool, id, payload).await?))
}

/// DELETE /api/devices/{id} - rejected while a fixture or launch uses it
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    catalog::delete_device(&state.pool, id).await?;
    Ok(Json(true))
}
