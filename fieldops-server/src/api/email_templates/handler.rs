//! Email template API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::email;
use crate::services::notifications;
use crate::utils::validation::{
    MAX_BODY_LEN, MAX_NAME_LEN, MAX_SUBJECT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    EmailLog, EmailTemplate, EmailTemplateCreate, EmailTemplateUpdate, MailtoLink, MailtoRequest,
    RenderRequest, RenderedEmail, SendEmailRequest,
};

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::TemplateNotFound).with_detail("id", id)
}

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// GET /api/email-templates
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<EmailTemplate>>> {
    Ok(Json(email::find_all(&state.pool).await?))
}

/// GET /api/email-templates/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmailTemplate>> {
    let template = email::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(template))
}

/// POST /api/email-templates
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmailTemplateCreate>,
) -> AppResult<Json<EmailTemplate>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.subject, "subject", MAX_SUBJECT_LEN)?;
    validate_required_text(&payload.body, "body", MAX_BODY_LEN)?;

    Ok(Json(email::create(&state.pool, payload).await?))
}

/// PUT /api/email-templates/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmailTemplateUpdate>,
) -> AppResult<Json<EmailTemplate>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(subject) = &payload.subject {
        validate_required_text(subject, "subject", MAX_SUBJECT_LEN)?;
    }
    validate_optional_text(&payload.body, "body", MAX_BODY_LEN)?;

    let template = email::update(&state.pool, id, payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(template))
}

/// DELETE /api/email-templates/{id} - log entries keep their row without the link
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if !email::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    Ok(Json(true))
}

/// POST /api/email-templates/{id}/render - substitute placeholders
pub async fn render(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RenderRequest>,
) -> AppResult<Json<RenderedEmail>> {
    let rendered =
        notifications::render_template(&state.pool, id, &payload, &state.config.public_base_url)
            .await?;
    Ok(Json(rendered))
}

/// POST /api/email-templates/{id}/mailto - rendered `mailto:` URI for the local mail client
pub async fn mailto(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MailtoRequest>,
) -> AppResult<Json<MailtoLink>> {
    let link =
        notifications::mailto_link(&state.pool, id, &payload, &state.config.public_base_url)
            .await?;
    Ok(Json(link))
}

/// POST /api/email-templates/{id}/send - deliver through the email function
pub async fn send(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SendEmailRequest>,
) -> AppResult<Json<EmailLog>> {
    let entry = notifications::send_email(
        &state.pool,
        state.mailer.as_ref(),
        id,
        &payload,
        &state.config.public_base_url,
    )
    .await?;
    Ok(Json(entry))
}

/// GET /api/email-log?limit= - newest first
pub async fn list_log(
    State(state): State<ServerState>,
    Query(query): Query<LogQuery>,
) -> AppResult<Json<Vec<EmailLog>>> {
    let limit = query.limit.clamp(1, 1000);
    Ok(Json(email::find_log(&state.pool, limit).await?))
}
