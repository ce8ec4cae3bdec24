//! Upload checks for user-selected files.
//!
//! These run before any bytes are read, using only the `File`'s declared
//! type and size.
//!
//! ```typescript
//! import { check_upload } from '@cropframe/wasm';
//!
//! try {
//!   check_upload(file.type, file.size);
//! } catch (e) {
//!   showInlineError(e);
//! }
//! ```

use cropframe_core::decode::{UploadPolicy, DEFAULT_MAX_UPLOAD_BYTES};
use wasm_bindgen::prelude::*;

/// Check a file's MIME type (`image/*`) and size (at most 5 MiB).
#[wasm_bindgen]
pub fn check_upload(mime: &str, size: f64) -> Result<(), JsValue> {
    UploadPolicy::default()
        .check(mime, size_to_bytes(size))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Largest accepted upload in bytes.
#[wasm_bindgen]
pub fn max_upload_bytes() -> f64 {
    DEFAULT_MAX_UPLOAD_BYTES as f64
}

/// JS numbers arrive as f64; negative or NaN sizes count as empty.
fn size_to_bytes(size: f64) -> u64 {
    if size.is_nan() || size <= 0.0 {
        return 0;
    }
    size.ceil() as u64
}
