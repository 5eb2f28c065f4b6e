//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::StoreNotFound
            | Self::FixtureNotFound
            | Self::FixtureNotAttached
            | Self::DeviceNotFound
            | Self::PriceTagNotFound
            | Self::LaunchNotFound
            | Self::VisitNotFound
            | Self::PendingVisitNotFound
            | Self::TrainingNotFound
            | Self::TacticianNotFound
            | Self::TemplateNotFound
            | Self::FileNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::FixtureAlreadyAttached
            | Self::DeviceInUse
            | Self::PriceTagNameExists
            | Self::LaunchInvalidTransition
            | Self::LaunchNotEditable
            | Self::StoreAlreadyPending
            | Self::StoreAlreadyScheduled
            | Self::VisitNotScheduled => StatusCode::CONFLICT,

            // 413 Payload Too Large
            Self::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            // 502 Bad Gateway (remote email function failed)
            Self::EmailSendFailed => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::EmailNotConfigured
            | Self::FileStorageFailed => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
