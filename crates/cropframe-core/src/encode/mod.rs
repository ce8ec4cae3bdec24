//! Encoding of exported crops.
//!
//! This module provides:
//! - JPEG encoding of RGBA rasters with configurable quality
//! - `data:` URL construction for inline previews
//!
//! The data URL handed to a host is always built from the same JPEG bytes as
//! the upload payload, so both show identical pixels.

mod data_url;
mod jpeg;

pub use data_url::{to_data_url, JPEG_MIME};
pub use jpeg::{encode_jpeg, EncodeError};
