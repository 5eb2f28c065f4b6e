//! Price-tag PDF storage
//!
//! Files live flat under `{work_dir}/price_tags/` named by the SHA-256 of
//! their content, so uploading the same PDF twice stores it once.

use sha2::{Digest, Sha256};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::StoredFile;
use std::fs;
use std::path::PathBuf;

/// PDF magic bytes
const PDF_MAGIC: &[u8] = b"%PDF";

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Stored names are `{64 hex}.pdf`; anything else is rejected before
/// touching the filesystem.
fn is_valid_file_name(name: &str) -> bool {
    match name.strip_suffix(".pdf") {
        Some(hash) => hash.len() == 64 && hash.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

#[derive(Debug, Clone)]
pub struct PriceTagStorage {
    dir: PathBuf,
    max_bytes: usize,
}

impl PriceTagStorage {
    pub fn new(dir: PathBuf, max_bytes: usize) -> Self {
        Self { dir, max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    fn validate(&self, data: &[u8]) -> AppResult<()> {
        if data.is_empty() {
            return Err(AppError::new(ErrorCode::EmptyFile));
        }
        if data.len() > self.max_bytes {
            return Err(AppError::with_message(
                ErrorCode::FileTooLarge,
                format!(
                    "File too large. Maximum size is {} bytes ({}MB)",
                    self.max_bytes,
                    self.max_bytes / 1024 / 1024
                ),
            )
            .with_detail("size", data.len()));
        }
        if !data.starts_with(PDF_MAGIC) {
            return Err(AppError::with_message(
                ErrorCode::UnsupportedFileFormat,
                "Only PDF files are accepted",
            ));
        }
        Ok(())
    }

    /// Validate and store a PDF, returning its content-addressed name
    pub fn save(&self, data: &[u8]) -> AppResult<StoredFile> {
        self.validate(data)?;

        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::with_message(
                ErrorCode::FileStorageFailed,
                format!("Failed to create price tag directory: {e}"),
            )
        })?;

        let sha256 = calculate_hash(data);
        let file_name = format!("{sha256}.pdf");
        let path = self.dir.join(&file_name);

        if path.exists() {
            tracing::debug!(file = %file_name, "Price tag PDF already stored, reusing");
        } else {
            // Write under a temp name first so readers never see a partial file
            let tmp = self.dir.join(format!("{file_name}.tmp"));
            fs::write(&tmp, data)
                .and_then(|_| fs::rename(&tmp, &path))
                .map_err(|e| {
                    AppError::with_message(
                        ErrorCode::FileStorageFailed,
                        format!("Failed to save file: {e}"),
                    )
                })?;
            tracing::info!(file = %file_name, size = data.len(), "Price tag PDF stored");
        }

        Ok(StoredFile {
            file_name,
            size: data.len() as u64,
            sha256,
        })
    }

    /// Read a stored PDF by name
    pub fn read(&self, file_name: &str) -> AppResult<Vec<u8>> {
        if !is_valid_file_name(file_name) {
            return Err(AppError::new(ErrorCode::FileNotFound).with_detail("file", file_name));
        }
        let path = self.dir.join(file_name);
        fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                AppError::new(ErrorCode::FileNotFound).with_detail("file", file_name)
            }
            _ => AppError::with_message(
                ErrorCode::FileStorageFailed,
                format!("Failed to read file: {e}"),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(dir: &tempfile::TempDir, max: usize) -> PriceTagStorage {
        PriceTagStorage::new(dir.path().join("price_tags"), max)
    }

    #[test]
    fn test_save_and_read_roundtrip_dedups() {
        let dir = tempfile::tempdir().unwrap();
        let s = storage(&dir, 1024);
        let pdf = b"%PDF-1.7 fake body";

        let first = s.save(pdf).unwrap();
        let second = s.save(pdf).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.file_name, format!("{}.pdf", first.sha256));
        assert_eq!(s.read(&first.file_name).unwrap(), pdf.to_vec());

        let entries = fs::read_dir(dir.path().join("price_tags")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_rejects_bad_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let s = storage(&dir, 16);

        assert_eq!(s.save(b"").unwrap_err().code, ErrorCode::EmptyFile);
        assert_eq!(
            s.save(b"PK\x03\x04 not a pdf").unwrap_err().code,
            ErrorCode::UnsupportedFileFormat
        );
        assert_eq!(
            s.save(b"%PDF-1.7 this is far too long").unwrap_err().code,
            ErrorCode::FileTooLarge
        );
    }

    #[test]
    fn test_read_rejects_traversal_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = storage(&dir, 1024);

        assert_eq!(s.read("../secret.pdf").unwrap_err().code, ErrorCode::FileNotFound);
        assert_eq!(s.read("fieldops.db").unwrap_err().code, ErrorCode::FileNotFound);
        let missing = format!("{}.pdf", "a".repeat(64));
        assert_eq!(s.read(&missing).unwrap_err().code, ErrorCode::FileNotFound);
    }
}
