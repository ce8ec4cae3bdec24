//! Coordinate mapping between editor space and source-image pixel space.
//!
//! Every function in this module is pure: no image data is touched, only
//! dimensions and [`ImagePosition`](crate::ImagePosition) state.
//!
//! # Coordinate Spaces
//!
//! - **Canvas space**: pixels of the square preview canvas, origin top-left.
//!   The crop window ([`CropRegion`]) lives here.
//! - **Source space**: pixels of the original, unscaled image.
//! - **Offset space**: the pixel pan applied to an image that is otherwise
//!   centred on the canvas ([`PanOffset`]).
//!
//! An image drawn at scale `s` with offset `(ox, oy)` has its top-left corner at
//!
//! ```text
//! draw_x = (canvas - width * s) / 2 + ox
//! draw_y = (canvas - height * s) / 2 + oy
//! ```

mod fit;
mod pan;
mod rect;

pub use fit::compute_initial_fit;
pub use pan::{clamp_pan, offset_from_position, position_from_offset, PanOffset};
pub use rect::{image_placement, to_source_rect, CropRegion, Rect, SourceRect};

use thiserror::Error;

use crate::decode::SourceImage;

/// Errors raised by geometry functions.
///
/// These indicate programmer error (mapping before an image is decoded,
/// or a zoom that was never clamped) and are always propagated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// The source image has a zero dimension, or its pixel buffer does not
    /// match its size (not decoded).
    #[error("Invalid source image: {width}x{height}")]
    InvalidImage { width: u32, height: u32 },

    /// The zoom factor is zero, negative or not finite.
    #[error("Invalid zoom factor: {0} (must be positive and finite)")]
    InvalidZoom(f64),

    /// The canvas size is zero, negative or not finite.
    #[error("Invalid canvas size: {0}")]
    InvalidCanvas(f64),
}

/// Validate image dimensions and return them as floats.
pub(crate) fn checked_dimensions(width: u32, height: u32) -> Result<(f64, f64), GeometryError> {
    if width == 0 || height == 0 {
        return Err(GeometryError::InvalidImage { width, height });
    }
    Ok((width as f64, height as f64))
}

/// Validate that an image is decoded: non-zero size and a full RGBA buffer.
pub(crate) fn checked_source(image: &SourceImage) -> Result<(), GeometryError> {
    if !image.is_valid() {
        return Err(GeometryError::InvalidImage {
            width: image.width,
            height: image.height,
        });
    }
    Ok(())
}

/// Validate a scale factor.
pub(crate) fn checked_scale(scale: f64) -> Result<f64, GeometryError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(GeometryError::InvalidZoom(scale));
    }
    Ok(scale)
}

/// Validate a canvas edge length.
pub(crate) fn checked_canvas(canvas_size: f64) -> Result<f64, GeometryError> {
    if !canvas_size.is_finite() || canvas_size <= 0.0 {
        return Err(GeometryError::InvalidCanvas(canvas_size));
    }
    Ok(canvas_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_dimensions() {
        assert_eq!(checked_dimensions(40, 20), Ok((40.0, 20.0)));
        assert_eq!(
            checked_dimensions(0, 20),
            Err(GeometryError::InvalidImage {
                width: 0,
                height: 20
            })
        );
        assert!(checked_dimensions(20, 0).is_err());
    }

    #[test]
    fn test_checked_scale() {
        assert_eq!(checked_scale(0.15), Ok(0.15));
        assert!(matches!(checked_scale(0.0), Err(GeometryError::InvalidZoom(_))));
        assert!(matches!(checked_scale(-1.0), Err(GeometryError::InvalidZoom(_))));
        assert!(matches!(
            checked_scale(f64::INFINITY),
            Err(GeometryError::InvalidZoom(_))
        ));
    }

    #[test]
    fn test_checked_canvas() {
        assert!(checked_canvas(300.0).is_ok());
        assert!(matches!(
            checked_canvas(0.0),
            Err(GeometryError::InvalidCanvas(_))
        ));
    }

    #[test]
    fn test_checked_source_rejects_undecoded_buffer() {
        let undecoded = SourceImage {
            width: 10,
            height: 10,
            pixels: vec![],
        };
        assert_eq!(
            checked_source(&undecoded),
            Err(GeometryError::InvalidImage {
                width: 10,
                height: 10
            })
        );
        assert!(checked_source(&SourceImage::filled(3, 2, [0, 0, 0, 255])).is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = GeometryError::InvalidImage {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "Invalid source image: 0x10");

        let err = GeometryError::InvalidZoom(-2.0);
        assert_eq!(
            err.to_string(),
            "Invalid zoom factor: -2 (must be positive and finite)"
        );
    }
}
