//! Source image decoding for the crop engine.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG bytes into an RGBA [`SourceImage`]
//! - Applying EXIF orientation the way browsers do
//! - Checking uploads against a size / MIME policy before decoding
//!
//! # Architecture
//!
//! Decoding is the only step of the engine that a caller may run off the
//! main path (file read / network fetch). Everything after it is synchronous.
//!
//! # Examples
//!
//! ```ignore
//! use cropframe_core::decode::{decode_image, UploadPolicy};
//!
//! UploadPolicy::default().check("image/jpeg", bytes.len() as u64)?;
//! let image = decode_image(&bytes)?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod source;
mod types;
mod upload;

pub use source::decode_image;
pub(crate) use types::Orientation;
pub use types::{DecodeError, FilterType, SourceImage};
pub use upload::{UploadError, UploadPolicy, DEFAULT_MAX_UPLOAD_BYTES};
