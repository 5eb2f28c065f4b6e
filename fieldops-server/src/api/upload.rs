//! Multipart PDF extraction shared by the price-tag upload endpoints

use axum::extract::Multipart;

use crate::utils::{AppError, AppResult, ErrorCode};

/// Read the `file` field of a multipart body
pub(crate) async fn read_file_field(mut multipart: Multipart) -> AppResult<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;
            return Ok(data.to_vec());
        }
    }

    Err(AppError::with_message(
        ErrorCode::NoFileProvided,
        "No 'file' field found. Field name must be 'file'",
    ))
}
