//! JPEG encoding for exported crops.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! Input is RGBA; since JPEG has no alpha channel, pixels are flattened onto
//! black first, which is what a browser canvas does for `image/jpeg` blobs.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGBA pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, used for avatar uploads (default: 90)
/// * 60-80: Medium quality, acceptable for thumbnails
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);
    let rgb = flatten_onto_black(pixels);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Composite straight-alpha RGBA over opaque black, dropping alpha.
fn flatten_onto_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &channel in &px[..3] {
            rgb.push(((channel as u32 * alpha + 127) / 255) as u8);
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 4];
        let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 4];
        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        // RGB-sized buffer is wrong for RGBA input
        let pixels = vec![128u8; 100 * 100 * 3];
        let result = encode_jpeg(&pixels, 100, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_jpeg_zero_dimensions() {
        assert!(matches!(
            encode_jpeg(&[], 0, 100, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_jpeg(&[], 100, 0, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_decodes_back_to_size() {
        let pixels = vec![200u8; 64 * 32 * 4];
        let jpeg = encode_jpeg(&pixels, 64, 32, 90).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 32));
    }

    #[test]
    fn test_flatten_onto_black() {
        let rgba = [200, 100, 50, 255, 200, 100, 50, 0, 255, 255, 255, 128];
        let rgb = flatten_onto_black(&rgba);
        assert_eq!(rgb, vec![200, 100, 50, 0, 0, 0, 128, 128, 128]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Encoding always produces valid JPEG when given valid input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            width in 1u32..=40,
            height in 1u32..=40,
            quality in 1u8..=100,
            alpha in any::<u8>(),
        ) {
            let pixels: Vec<u8> = (0..(width * height) as usize)
                .flat_map(|i| [(i % 256) as u8, 128, 64, alpha])
                .collect();

            let jpeg = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: Same input always produces same output.
        #[test]
        fn prop_deterministic_output(
            width in 1u32..=20,
            height in 1u32..=20,
            quality in 1u8..=100,
        ) {
            let pixels = vec![100u8; (width * height * 4) as usize];
            let first = encode_jpeg(&pixels, width, height, quality).unwrap();
            let second = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: Invalid pixel data length always returns error.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            width in 1u32..=20,
            height in 1u32..=20,
            delta in 1usize..=7,
        ) {
            let pixels = vec![128u8; (width * height * 4) as usize + delta];
            let rejected = matches!(
                encode_jpeg(&pixels, width, height, 90),
                Err(EncodeError::InvalidPixelData { .. })
            );
            prop_assert!(rejected);
        }
    }
}
