//! Fixture API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, State},
};

use crate::api::upload::read_file_field;
use crate::core::ServerState;
use crate::db::repository::{fixture, store};
use crate::services::fixtures;
use crate::utils::AppResult;
use shared::models::{
    Fixture, FixtureCreate, FixtureDevicesReplace, FixtureUpdate, ManualPriceTagCreate, Store,
};

/// GET /api/fixtures
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Fixture>>> {
    Ok(Json(fixture::find_all(&state.pool).await?))
}

/// GET /api/fixtures/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Fixture>> {
    Ok(Json(fixtures::load(&state.pool, id).await?))
}

/// POST /api/fixtures
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FixtureCreate>,
) -> AppResult<Json<Fixture>> {
    Ok(Json(fixtures::create(&state.pool, payload).await?))
}

/// PUT /api/fixtures/{id} - name, type and notes only
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<FixtureUpdate>,
) -> AppResult<Json<Fixture>> {
    Ok(Json(fixtures::update(&state.pool, id, payload).await?))
}

/// DELETE /api/fixtures/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    fixtures::delete(&state.pool, id).await?;
    Ok(Json(true))
}

/// PUT /api/fixtures/{id}/devices - replace placed devices and resync tags
pub async fn replace_devices(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<FixtureDevicesReplace>,
) -> AppResult<Json<Fixture>> {
    let fixture = fixtures::replace_devices(&state.pool, id, &payload.devices).await?;
    Ok(Json(fixture))
}

/// GET /api/fixtures/{id}/stores - stores this fixture is attached to
pub async fn list_stores(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Store>>> {
    fixtures::load(&state.pool, id).await?;
    Ok(Json(store::find_by_fixture_ids(&state.pool, &[id]).await?))
}

/// POST /api/fixtures/{id}/price-tags
pub async fn add_manual_tag(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ManualPriceTagCreate>,
) -> AppResult<Json<Fixture>> {
    Ok(Json(fixtures::add_manual_tag(&state.pool, id, &payload.name).await?))
}

/// DELETE /api/fixtures/{id}/price-tags/{name}
pub async fn remove_manual_tag(
    State(state): State<ServerState>,
    Path((id, name)): Path<(i64, String)>,
) -> AppResult<Json<Fixture>> {
    Ok(Json(fixtures::remove_manual_tag(&state.pool, id, &name).await?))
}

/// POST /api/fixtures/{id}/price-tags/{name}/pdf - multipart, field `file`
pub async fn upload_tag_pdf(
    State(state): State<ServerState>,
    Path((id, name)): Path<(i64, String)>,
    multipart: Multipart,
) -> AppResult<Json<Fixture>> {
    // Fail before storing anything when the fixture is gone
    fixtures::load(&state.pool, id).await?;

    let data = read_file_field(multipart).await?;
    let stored = state.storage.save(&data)?;
    tracing::info!(fixture_id = id, tag = %name, file = %stored.file_name, "Fixture price tag PDF uploaded");

    let fixture = fixtures::set_tag_pdf(&state.pool, id, &name, &stored.file_name).await?;
    Ok(Json(fixture))
}
