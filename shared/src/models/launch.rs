//! Launch Model (product rollout)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Launch lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum LaunchStatus {
    #[default]
    Draft,
    Opened,
    Completed,
    Cancelled,
}

impl LaunchStatus {
    /// draft → opened → completed, and draft|opened → cancelled
    pub fn can_transition_to(&self, next: LaunchStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Opened)
                | (Self::Opened, Self::Completed)
                | (Self::Draft, Self::Cancelled)
                | (Self::Opened, Self::Cancelled)
        )
    }

    /// Dates, devices and name can only change before completion
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft | Self::Opened)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Opened => "opened",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Launch entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Launch {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: LaunchStatus,
    /// Sorted, deduplicated
    #[cfg_attr(feature = "db", sqlx(json))]
    pub dates: Vec<NaiveDate>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub device_ids: Vec<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Launch {
    pub fn slug(&self) -> String {
        crate::util::slugify(&self.name)
    }
}

/// Create launch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchCreate {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
    #[serde(default)]
    pub device_ids: Vec<i64>,
}

/// Update launch payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Replace launch dates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchDatesUpdate {
    pub dates: Vec<NaiveDate>,
}

/// Replace selected devices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchDevicesUpdate {
    pub device_ids: Vec<i64>,
}

/// Status change request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchStatusChange {
    pub status: LaunchStatus,
}

/// Outcome of queueing impacted stores into a launch's pending queue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(LaunchStatus::Draft.can_transition_to(LaunchStatus::Opened));
        assert!(LaunchStatus::Opened.can_transition_to(LaunchStatus::Completed));
        assert!(LaunchStatus::Draft.can_transition_to(LaunchStatus::Cancelled));
        assert!(LaunchStatus::Opened.can_transition_to(LaunchStatus::Cancelled));
    }

    #[test]
    fn test_rejected_transitions() {
        assert!(!LaunchStatus::Draft.can_transition_to(LaunchStatus::Completed));
        assert!(!LaunchStatus::Completed.can_transition_to(LaunchStatus::Opened));
        assert!(!LaunchStatus::Cancelled.can_transition_to(LaunchStatus::Draft));
        assert!(!LaunchStatus::Opened.can_transition_to(LaunchStatus::Opened));
    }

    #[test]
    fn test_editable() {
        assert!(LaunchStatus::Draft.is_editable());
        assert!(LaunchStatus::Opened.is_editable());
        assert!(!LaunchStatus::Completed.is_editable());
        assert!(!LaunchStatus::Cancelled.is_editable());
    }
}
