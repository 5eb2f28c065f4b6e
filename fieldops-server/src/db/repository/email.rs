//! Email template and delivery log Repository

use super::RepoResult;
use shared::models::{EmailLog, EmailStatus, EmailTemplate, EmailTemplateCreate, EmailTemplateUpdate};
use sqlx::{SqliteExecutor, SqlitePool};

const SELECT: &str = "SELECT id, name, subject, body, created_at, updated_at FROM email_templates";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<EmailTemplate>> {
    let template = sqlx::query_as::<_, EmailTemplate>(&format!("{SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(template)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<EmailTemplate>> {
    let templates = sqlx::query_as::<_, EmailTemplate>(&format!("{SELECT} ORDER BY name"))
        .fetch_all(pool)
        .await?;
    Ok(templates)
}

pub async fn create(pool: &SqlitePool, data: EmailTemplateCreate) -> RepoResult<EmailTemplate> {
    let now = shared::util::now_millis();
    let template = sqlx::query_as::<_, EmailTemplate>(
        "INSERT INTO email_templates (id, name, subject, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING id, name, subject, body, created_at, updated_at",
    )
    .bind(shared::util::snowflake_id())
    .bind(data.name.trim())
    .bind(data.subject)
    .bind(data.body)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(template)
}

pub async fn insert_row<'e, E: SqliteExecutor<'e>>(ex: E, t: &EmailTemplate) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO email_templates (id, name, subject, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(t.id)
    .bind(&t.name)
    .bind(&t.subject)
    .bind(&t.body)
    .bind(t.created_at)
    .bind(t.updated_at)
    .execute(ex)
    .await?;
    Ok(())
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: EmailTemplateUpdate,
) -> RepoResult<Option<EmailTemplate>> {
    let template = sqlx::query_as::<_, EmailTemplate>(
        "UPDATE email_templates SET name = COALESCE(?1, name), subject = COALESCE(?2, subject), body = COALESCE(?3, body), updated_at = ?4 WHERE id = ?5 RETURNING id, name, subject, body, created_at, updated_at",
    )
    .bind(data.name.as_deref().map(str::trim))
    .bind(data.subject)
    .bind(data.body)
    .bind(shared::util::now_millis())
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(template)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM email_templates WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ── Delivery log ────────────────────────────────────────────────────

pub async fn log_attempt(
    pool: &SqlitePool,
    template_id: Option<i64>,
    recipients: &str,
    subject: &str,
    status: EmailStatus,
    error: Option<&str>,
) -> RepoResult<EmailLog> {
    let entry = sqlx::query_as::<_, EmailLog>(
        "INSERT INTO email_log (id, template_id, recipients, subject, status, error, created_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id, template_id, recipients, subject, status, error, created_at",
    )
    .bind(shared::util::snowflake_id())
    .bind(template_id)
    .bind(recipients)
    .bind(subject)
    .bind(status)
    .bind(error)
    .bind(shared::util::now_millis())
    .fetch_one(pool)
    .await?;
    Ok(entry)
}

pub async fn find_log(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<EmailLog>> {
    let entries = sqlx::query_as::<_, EmailLog>(
        "SELECT id, template_id, recipients, subject, status, error, created_at FROM email_log ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(entries)
}
