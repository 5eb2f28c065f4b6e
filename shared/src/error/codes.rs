//! Unified error codes for the fieldops workspace
//!
//! Error codes are organized by domain:
//! - 0xxx: General errors
//! - 1xxx: Store errors
//! - 2xxx: Fixture, device and price tag errors
//! - 3xxx: Launch errors
//! - 4xxx: Scheduling errors (pending queue, visits, trainings)
//! - 5xxx: Tactician errors
//! - 6xxx: Notification errors
//! - 7xxx: Backup and file errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Store ====================
    StoreNotFound = 1001,

    // ==================== 2xxx: Fixture / Device / Price tag ====================
    FixtureNotFound = 2001,
    FixtureAlreadyAttached = 2002,
    FixtureNotAttached = 2003,
    DuplicateDevicePosition = 2004,
    DeviceNotFound = 2101,
    DeviceInUse = 2102,
    PriceTagNotFound = 2201,
    PriceTagNameExists = 2202,

    // ==================== 3xxx: Launch ====================
    LaunchNotFound = 3001,
    LaunchInvalidTransition = 3002,
    LaunchNotEditable = 3003,

    // ==================== 4xxx: Scheduling ====================
    VisitNotFound = 4001,
    PendingVisitNotFound = 4002,
    StoreAlreadyPending = 4003,
    StoreAlreadyScheduled = 4004,
    DateInPast = 4005,
    DateOnWeekend = 4006,
    VisitNotScheduled = 4007,
    TrainingNotFound = 4101,
    InvalidTimeRange = 4102,

    // ==================== 5xxx: Tactician ====================
    TacticianNotFound = 5001,

    // ==================== 6xxx: Notification ====================
    TemplateNotFound = 6001,
    EmailSendFailed = 6002,
    EmailNotConfigured = 6003,

    // ==================== 7xxx: Backup / File ====================
    BackupVersionUnsupported = 7001,
    InvalidBackup = 7002,
    FileTooLarge = 7101,
    UnsupportedFileFormat = 7102,
    NoFileProvided = 7103,
    EmptyFile = 7104,
    FileNotFound = 7105,
    FileStorageFailed = 7106,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
    NetworkError = 9003,
    TimeoutError = 9004,
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default human-readable message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Store
            ErrorCode::StoreNotFound => "Store not found",

            // Fixture / Device / Price tag
            ErrorCode::FixtureNotFound => "Table not found",
            ErrorCode::FixtureAlreadyAttached => "Table is already attached to this store",
            ErrorCode::FixtureNotAttached => "Table is not attached to this store",
            ErrorCode::DuplicateDevicePosition => "Two devices share the same position",
            ErrorCode::DeviceNotFound => "Device not found",
            ErrorCode::DeviceInUse => "Device is placed on a table or selected by a launch",
            ErrorCode::PriceTagNotFound => "Price tag not found",
            ErrorCode::PriceTagNameExists => "Price tag name already exists",

            // Launch
            ErrorCode::LaunchNotFound => "Launch not found",
            ErrorCode::LaunchInvalidTransition => "Launch status transition not allowed",
            ErrorCode::LaunchNotEditable => "Launch can no longer be edited",

            // Scheduling
            ErrorCode::VisitNotFound => "Visit not found",
            ErrorCode::PendingVisitNotFound => "Pending visit not found",
            ErrorCode::StoreAlreadyPending => "Store is already in the pending queue",
            ErrorCode::StoreAlreadyScheduled => "Store already has a scheduled visit",
            ErrorCode::DateInPast => "Date is in the past",
            ErrorCode::DateOnWeekend => "Visits cannot be scheduled on weekends",
            ErrorCode::VisitNotScheduled => "Visit is not in scheduled state",
            ErrorCode::TrainingNotFound => "Training session not found",
            ErrorCode::InvalidTimeRange => "End time must be after start time",

            // Tactician
            ErrorCode::TacticianNotFound => "Tactician not found",

            // Notification
            ErrorCode::TemplateNotFound => "Email template not found",
            ErrorCode::EmailSendFailed => "Email delivery failed",
            ErrorCode::EmailNotConfigured => "Email delivery is not configured",

            // Backup / File
            ErrorCode::BackupVersionUnsupported => "Unsupported backup version",
            ErrorCode::InvalidBackup => "Invalid backup file",
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::FileNotFound => "File not found",
            ErrorCode::FileStorageFailed => "File storage failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

/// Error returned when a u16 does not map to a known code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Store
            1001 => Ok(ErrorCode::StoreNotFound),

            // Fixture / Device / Price tag
            2001 => Ok(ErrorCode::FixtureNotFound),
            2002 => Ok(ErrorCode::FixtureAlreadyAttached),
            2003 => Ok(ErrorCode::FixtureNotAttached),
            2004 => Ok(ErrorCode::DuplicateDevicePosition),
            2101 => Ok(ErrorCode::DeviceNotFound),
            2102 => Ok(ErrorCode::DeviceInUse),
            2201 => Ok(ErrorCode::PriceTagNotFound),
            2202 => Ok(ErrorCode::PriceTagNameExists),

            // Launch
            3001 => Ok(ErrorCode::LaunchNotFound),
            3002 => Ok(ErrorCode::LaunchInvalidTransition),
            3003 => Ok(ErrorCode::LaunchNotEditable),

            // Scheduling
            4001 => Ok(ErrorCode::VisitNotFound),
            4002 => Ok(ErrorCode::PendingVisitNotFound),
            4003 => Ok(ErrorCode::StoreAlreadyPending),
            4004 => Ok(ErrorCode::StoreAlreadyScheduled),
            4005 => Ok(ErrorCode::DateInPast),
            4006 => Ok(ErrorCode::DateOnWeekend),
            4007 => Ok(ErrorCode::VisitNotScheduled),
            4101 => Ok(ErrorCode::TrainingNotFound),
            4102 => Ok(ErrorCode::InvalidTimeRange),

            // Tactician
            5001 => Ok(ErrorCode::TacticianNotFound),

            // Notification
            6001 => Ok(ErrorCode::TemplateNotFound),
            6002 => Ok(ErrorCode::EmailSendFailed),
            6003 => Ok(ErrorCode::EmailNotConfigured),

            // Backup / File
            7001 => Ok(ErrorCode::BackupVersionUnsupported),
            7002 => Ok(ErrorCode::InvalidBackup),
            7101 => Ok(ErrorCode::FileTooLarge),
            7102 => Ok(ErrorCode::UnsupportedFileFormat),
            7103 => Ok(ErrorCode::NoFileProvided),
            7104 => Ok(ErrorCode::EmptyFile),
            7105 => Ok(ErrorCode::FileNotFound),
            7106 => Ok(ErrorCode::FileStorageFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::StoreNotFound.code(), 1001);
        assert_eq!(ErrorCode::FixtureNotFound.code(), 2001);
        assert_eq!(ErrorCode::DeviceNotFound.code(), 2101);
        assert_eq!(ErrorCode::LaunchNotFound.code(), 3001);
        assert_eq!(ErrorCode::DateOnWeekend.code(), 4006);
        assert_eq!(ErrorCode::TacticianNotFound.code(), 5001);
        assert_eq!(ErrorCode::TemplateNotFound.code(), 6001);
        assert_eq!(ErrorCode::BackupVersionUnsupported.code(), 7001);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(4003), Ok(ErrorCode::StoreAlreadyPending));
        assert_eq!(ErrorCode::try_from(7105), Ok(ErrorCode::FileNotFound));
        assert_eq!(ErrorCode::try_from(9005), Ok(ErrorCode::ConfigError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::NotFound).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&ErrorCode::DateInPast).unwrap(),
            "4005"
        );
        let code: ErrorCode = serde_json::from_str("4006").unwrap();
        assert_eq!(code, ErrorCode::DateOnWeekend);
        assert!(serde_json::from_str::<ErrorCode>("999").is_err());
    }

    #[test]
    fn test_invalid_error_code_display() {
        assert_eq!(
            format!("{}", InvalidErrorCode(999)),
            "invalid error code: 999"
        );
    }
}
