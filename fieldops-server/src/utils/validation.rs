//! Input validation helpers
//!
//! Centralized text length limits and validation functions. All checks run
//! before any write is issued.

use crate::utils::AppError;

/// Entity names: store, device, table, launch, template
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions
pub const MAX_NOTE_LEN: usize = 2000;

/// Short identifiers: phone, province, color, region
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Email subject
pub const MAX_SUBJECT_LEN: usize = 500;

/// Email template body
pub const MAX_BODY_LEN: usize = 20_000;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Minimal shape check for an email address (`local@domain`).
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::validation(format!(
            "{field} is not a valid email address: {value}"
        )));
    }
    Ok(())
}

/// Validate an optional email address
pub fn validate_optional_email(value: &Option<String>, field: &str) -> Result<(), AppError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => validate_email(v, field),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Comet Bologna", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("ok".into()), "notes", 5).is_ok());
        assert!(validate_optional_text(&Some("too long".into()), "notes", 5).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("manager@store.it", "email").is_ok());
        assert!(validate_email("manager.store.it", "email").is_err());
        assert!(validate_email("a@b@c", "email").is_err());
        assert!(validate_email("a b@c.it", "email").is_err());
        assert!(validate_optional_email(&Some(String::new()), "email").is_ok());
    }
}
