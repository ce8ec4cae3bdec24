//! Upload checks applied by callers before a file reaches the decoder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default size ceiling for uploaded images: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Reasons an upload is refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("File is not an image (declared type: {0:?})")]
    NotAnImage(String),

    #[error("File is too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },
}

/// Application-level policy for user-selected files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Largest accepted file, in bytes.
    pub max_bytes: u64,
    /// Required MIME type prefix.
    pub mime_prefix: String,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            mime_prefix: "image/".to_string(),
        }
    }
}

impl UploadPolicy {
    /// Check a file's declared MIME type and size.
    pub fn check(&self, mime: &str, size: u64) -> Result<(), UploadError> {
        if !mime.trim().to_ascii_lowercase().starts_with(&self.mime_prefix) {
            return Err(UploadError::NotAnImage(mime.to_string()));
        }
        if size > self.max_bytes {
            return Err(UploadError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}
