//! Tactician Model (field staff)

use serde::{Deserialize, Serialize};

/// Tactician entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tactician {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub region: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Create tactician payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TacticianCreate {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub region: Option<String>,
}

/// Update tactician payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TacticianUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub region: Option<String>,
    pub is_active: Option<bool>,
}
