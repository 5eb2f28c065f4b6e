//! Email template and delivery log models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Email template with placeholders in subject and body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmailTemplate {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create template payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailTemplateCreate {
    pub name: String,
    pub subject: String,
    pub body: String,
}

/// Update template payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailTemplateUpdate {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// Entities a template is rendered against. Missing values render as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderRequest {
    pub store_id: Option<i64>,
    pub launch_id: Option<i64>,
    pub visit_id: Option<i64>,
    pub tactician_id: Option<i64>,
    /// Overrides the visit date when no visit is given
    pub visit_date: Option<NaiveDate>,
}

/// Rendered template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
}

/// Build a mailto link from a template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailtoRequest {
    #[serde(flatten)]
    pub render: RenderRequest,
    pub to: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
}

/// Mailto link response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailtoLink {
    pub uri: String,
    pub subject: String,
    pub body: String,
}

/// Send through the remote email function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailRequest {
    #[serde(flatten)]
    pub render: RenderRequest,
    pub to: Vec<String>,
    #[serde(default)]
    pub cc: Vec<String>,
}

/// Delivery status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum EmailStatus {
    Sent,
    Failed,
}

/// One send attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmailLog {
    pub id: i64,
    pub template_id: Option<i64>,
    pub recipients: String,
    pub subject: String,
    pub status: EmailStatus,
    pub error: Option<String>,
    pub created_at: i64,
}
