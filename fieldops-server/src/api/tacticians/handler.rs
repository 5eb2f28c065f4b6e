//! Tactician API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::tactician;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Tactician, TacticianCreate, TacticianUpdate};

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::TacticianNotFound).with_detail("id", id)
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// GET /api/tacticians
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Tactician>>> {
    Ok(Json(tactician::find_all(&state.pool, query.active_only).await?))
}

/// GET /api/tacticians/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Tactician>> {
    let t = tactician::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(t))
}

/// POST /api/tacticians
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TacticianCreate>,
) -> AppResult<Json<Tactician>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_email(&payload.email, "email")?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.region, "region", MAX_SHORT_TEXT_LEN)?;

    let t = tactician::create(&state.pool, payload).await?;
    tracing::info!(id = t.id, name = %t.name, "Tactician created");
    Ok(Json(t))
}

/// PUT /api/tacticians/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TacticianUpdate>,
) -> AppResult<Json<Tactician>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_email(&payload.email, "email")?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.region, "region", MAX_SHORT_TEXT_LEN)?;

    let t = tactician::update(&state.pool, id, payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(t))
}

/// DELETE /api/tacticians/{id} - visits keep the row unassigned, trainings are removed
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if !tactician::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "Tactician deleted");
    Ok(Json(true))
}
