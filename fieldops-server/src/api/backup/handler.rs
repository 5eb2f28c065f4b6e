//! Backup API Handlers

use axum::{Json, extract::State, response::IntoResponse};
use http::header;

use crate::core::ServerState;
use crate::services::backup;
use crate::utils::AppResult;
use shared::models::{BackupDocument, BackupImportSummary};

/// GET /api/backup/export - JSON document served as an attachment
pub async fn export(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let doc = backup::export(&state.pool).await?;
    let file_name = format!(
        "fieldops-backup-{}.json",
        state.today().format("%Y-%m-%d")
    );
    Ok((
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )],
        Json(doc),
    ))
}

/// POST /api/backup/import - replaces every table in one transaction
pub async fn import(
    State(state): State<ServerState>,
    Json(doc): Json<BackupDocument>,
) -> AppResult<Json<BackupImportSummary>> {
    Ok(Json(backup::import(&state.pool, &doc).await?))
}
