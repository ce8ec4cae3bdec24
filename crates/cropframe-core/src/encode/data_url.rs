//! `data:` URL construction for exported images.

use base64::{engine::general_purpose, Engine as _};

/// MIME type of exported crops.
pub const JPEG_MIME: &str = "image/jpeg";

/// Build a base64 `data:` URL, e.g. `data:image/jpeg;base64,/9j/...`.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let encoded = general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, encoded)
}
