//! Training session model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Training session (rendered read-only on the calendar)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TrainingSession {
    pub id: i64,
    pub tactician_id: i64,
    pub store_id: i64,
    pub session_date: NaiveDate,
    /// HH:MM
    pub start_time: String,
    /// HH:MM
    pub end_time: String,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Training session joined with store and tactician names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TrainingDetail {
    pub id: i64,
    pub tactician_id: i64,
    pub store_id: i64,
    pub session_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
    pub store_name: String,
    pub tactician_name: String,
}

/// Create training payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingCreate {
    pub tactician_id: i64,
    pub store_id: i64,
    pub session_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

/// Update training payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingUpdate {
    pub tactician_id: Option<i64>,
    pub store_id: Option<i64>,
    pub session_date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub notes: Option<String>,
}
