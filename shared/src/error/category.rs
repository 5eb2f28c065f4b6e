//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Store errors
/// - 2xxx: Fixture, device and price tag errors
/// - 3xxx: Launch errors
/// - 4xxx: Scheduling errors
/// - 5xxx: Tactician errors
/// - 6xxx: Notification errors
/// - 7xxx: Backup and file errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Store errors (1xxx)
    Store,
    /// Fixture / device / price tag errors (2xxx)
    Fixture,
    /// Launch errors (3xxx)
    Launch,
    /// Scheduling errors (4xxx)
    Scheduling,
    /// Tactician errors (5xxx)
    Tactician,
    /// Notification errors (6xxx)
    Notification,
    /// Backup / file errors (7xxx)
    Storage,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Store,
            2000..3000 => Self::Fixture,
            3000..4000 => Self::Launch,
            4000..5000 => Self::Scheduling,
            5000..6000 => Self::Tactician,
            6000..7000 => Self::Notification,
            7000..8000 => Self::Storage,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Store => "store",
            Self::Fixture => "fixture",
            Self::Launch => "launch",
            Self::Scheduling => "scheduling",
            Self::Tactician => "tactician",
            Self::Notification => "notification",
            Self::Storage => "storage",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
