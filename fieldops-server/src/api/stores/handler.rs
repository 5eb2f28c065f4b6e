//! Store API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{fixture, store, visit};
use crate::services::{catalog, fixtures};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    Chain, ChainSyncReport, Fixture, Store, StoreCategory, StoreCreate, StoreUpdate, Visit,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<StoreCategory>,
    pub chain: Option<Chain>,
}

#[derive(Debug, Deserialize)]
pub struct VisitsQuery {
    pub launch_id: Option<i64>,
}

async fn load(state: &ServerState, id: i64) -> AppResult<Store> {
    store::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound).with_detail("id", id))
}

/// GET /api/stores - list stores, optionally by category and chain
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Store>>> {
    let stores = store::find_all(&state.pool, query.category, query.chain).await?;
    Ok(Json(stores))
}

/// GET /api/stores/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Store>> {
    Ok(Json(load(&state, id).await?))
}

/// POST /api/stores
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StoreCreate>,
) -> AppResult<Json<Store>> {
    let store = catalog::create_store(&state.pool, payload).await?;
    Ok(Json(store))
}

/// PUT /api/stores/{id} - a chain change resyncs both chain catalogs
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StoreUpdate>,
) -> AppResult<Json<Store>> {
    let store = catalog::update_store(&state.pool, id, payload).await?;
    Ok(Json(store))
}

/// DELETE /api/stores/{id} - cascades pending rows, visits, trainings and attachments
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    catalog::delete_store(&state.pool, id).await?;
    Ok(Json(true))
}

/// GET /api/stores/{id}/fixtures
pub async fn list_fixtures(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Fixture>>> {
    load(&state, id).await?;
    let fixtures = fixture::find_by_store(&state.pool, id).await?;
    Ok(Json(fixtures))
}

/// POST /api/stores/{id}/fixtures/{fixture_id}
pub async fn attach_fixture(
    State(state): State<ServerState>,
    Path((id, fixture_id)): Path<(i64, i64)>,
) -> AppResult<Json<ChainSyncReport>> {
    let report = fixtures::attach(&state.pool, id, fixture_id).await?;
    Ok(Json(report))
}

/// DELETE /api/stores/{id}/fixtures/{fixture_id}
pub async fn detach_fixture(
    State(state): State<ServerState>,
    Path((id, fixture_id)): Path<(i64, i64)>,
) -> AppResult<Json<ChainSyncReport>> {
    let report = fixtures::detach(&state.pool, id, fixture_id).await?;
    Ok(Json(report))
}

/// GET /api/stores/{id}/visits - visit history of a store in one context
pub async fn list_visits(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<VisitsQuery>,
) -> AppResult<Json<Vec<Visit>>> {
    load(&state, id).await?;
    let visits = visit::find_for_store(&state.pool, id, query.launch_id).await?;
    Ok(Json(visits))
}
