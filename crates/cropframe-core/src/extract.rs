//! Resolution-independent crop export.
//!
//! Extraction maps the crop window back into source space with
//! [`to_source_rect`](crate::geometry::to_source_rect), resamples that
//! rectangle to the configured output size and encodes the result once. The
//! JPEG bytes and the `data:` URL come from that single pass.
//!
//! # Out-of-bounds Regions
//!
//! A source rectangle that hangs past the image edge (extreme pan or zoom
//! out) is not special-cased: samples outside the image are transparent, so
//! the raster always has exactly the requested size. In the JPEG those areas
//! come out black.

use image::RgbaImage;
use thiserror::Error;

use crate::config::EditorConfig;
use crate::decode::{FilterType, SourceImage};
use crate::encode::{encode_jpeg, to_data_url, EncodeError, JPEG_MIME};
use crate::geometry::{checked_source, to_source_rect, GeometryError, SourceRect};
use crate::position::ImagePosition;
use crate::render::sample;

/// Errors that can occur during crop extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Extraction was requested before an image was loaded.
    #[error("No image loaded: load an image before extracting a crop")]
    NoImage,

    /// Mapping the crop window into source space failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Encoding the extracted raster failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// The result of one extraction pass.
#[derive(Debug, Clone)]
pub struct CropOutput {
    /// Resampled pixels at the output size, RGBA.
    pub raster: RgbaImage,
    /// JPEG encoding of `raster`, ready for upload.
    pub jpeg: Vec<u8>,
    /// `data:image/jpeg;base64,...` built from `jpeg`.
    pub data_url: String,
    /// Source rectangle that was sampled.
    pub source_rect: SourceRect,
}

impl CropOutput {
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }
}

/// Resample `rect` of `source` into an `out_width x out_height` raster.
///
/// Each output pixel centre maps to
/// `rect.x + (i + 0.5) * rect.width / out_width` in source space (and
/// likewise vertically). Samples outside the source are fully transparent.
pub fn resample_region(
    source: &SourceImage,
    rect: &SourceRect,
    out_width: u32,
    out_height: u32,
    filter: FilterType,
) -> RgbaImage {
    let mut output = RgbaImage::new(out_width, out_height);
    if out_width == 0 || out_height == 0 {
        return output;
    }

    let step_x = rect.width / out_width as f64;
    let step_y = rect.height / out_height as f64;

    for (i, j, pixel) in output.enumerate_pixels_mut() {
        let u = rect.x + (i as f64 + 0.5) * step_x;
        let v = rect.y + (j as f64 + 0.5) * step_y;
        pixel.0 = sample(source, u, v, filter);
    }

    output
}

/// Extract the crop window at the configured output size and encode it.
///
/// # Errors
///
/// - [`ExtractError::NoImage`] if `source` is `None`
/// - [`ExtractError::Geometry`] for an empty or undecoded image, or an invalid zoom
/// - [`ExtractError::Encode`] if the output size is empty or encoding fails
pub fn extract_crop(
    source: Option<&SourceImage>,
    position: &ImagePosition,
    config: &EditorConfig,
) -> Result<CropOutput, ExtractError> {
    let source = source.ok_or(ExtractError::NoImage)?;
    checked_source(source)?;

    let crop = config.crop_region();
    let rect = to_source_rect(
        position,
        source.width,
        source.height,
        config.canvas_size,
        &crop,
    )?;

    if !rect.is_within(source.width, source.height) {
        log::debug!(
            "crop rect ({:.1}, {:.1}, {:.1}x{:.1}) extends past {}x{} source",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            source.width,
            source.height
        );
    }

    let raster = resample_region(
        source,
        &rect,
        config.output_width,
        config.output_height,
        config.filter,
    );
    let jpeg = encode_jpeg(
        raster.as_raw(),
        raster.width(),
        raster.height(),
        config.jpeg_quality,
    )?;
    let data_url = to_data_url(JPEG_MIME, &jpeg);

    log::debug!(
        "extracted {}x{} crop ({} JPEG bytes)",
        raster.width(),
        raster.height(),
        jpeg.len()
    );

    Ok(CropOutput {
        raster,
        jpeg,
        data_url,
        source_rect: rect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose, Engine as _};

    /// Horizontal gradient so columns are distinguishable.
    fn gradient_image(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, 64, 192, 255]);
            }
        }
        SourceImage::new(width, height, pixels)
    }

    fn one_to_one_config() -> EditorConfig {
        // 240px crop exported at 240px: one output pixel per canvas pixel
        EditorConfig {
            output_width: 240,
            output_height: 240,
            filter: FilterType::Nearest,
            ..EditorConfig::avatar()
        }
    }

    #[test]
    fn test_no_image_fails() {
        let result = extract_crop(None, &ImagePosition::default(), &EditorConfig::avatar());
        assert!(matches!(result, Err(ExtractError::NoImage)));
    }

    #[test]
    fn test_undecoded_image_fails_instead_of_panicking() {
        let image = SourceImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 12],
        };
        let result = extract_crop(Some(&image), &ImagePosition::default(), &EditorConfig::avatar());
        assert!(matches!(
            result,
            Err(ExtractError::Geometry(GeometryError::InvalidImage {
                width: 10,
                height: 10
            }))
        ));
    }

    #[test]
    fn test_zero_dimension_image_fails() {
        let image = SourceImage::new(0, 10, Vec::new());
        let result = extract_crop(Some(&image), &ImagePosition::default(), &EditorConfig::avatar());
        assert!(matches!(
            result,
            Err(ExtractError::Geometry(GeometryError::InvalidImage { .. }))
        ));
    }

    #[test]
    fn test_output_has_configured_size() {
        let image = gradient_image(64, 48);
        let out = extract_crop(Some(&image), &ImagePosition::centered(5.0), &EditorConfig::avatar())
            .unwrap();
        assert_eq!((out.width(), out.height()), (512, 512));
        assert_eq!(out.raster.as_raw().len(), 512 * 512 * 4);
    }

    #[test]
    fn test_aspect_locked_output() {
        let image = gradient_image(320, 180);
        let config = EditorConfig::aspect_locked(16.0 / 9.0, 320);
        let out = extract_crop(Some(&image), &ImagePosition::centered(1.0), &config).unwrap();
        assert_eq!((out.width(), out.height()), (320, 180));
    }

    #[test]
    fn test_data_url_matches_jpeg_bytes() {
        let image = gradient_image(100, 100);
        let out = extract_crop(Some(&image), &ImagePosition::centered(2.4), &EditorConfig::general())
            .unwrap();

        let payload = out
            .data_url
            .strip_prefix("data:image/jpeg;base64,")
            .unwrap();
        assert_eq!(general_purpose::STANDARD.decode(payload).unwrap(), out.jpeg);
        assert_eq!(&out.jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_out_of_bounds_area_is_transparent() {
        // Anchor at the image's top-left corner: the crop window is centred
        // on source (0, 0), so its top-left quadrant lies outside the image.
        let image = gradient_image(100, 100);
        let position = ImagePosition::from_scale(0.0, 0.0, 1.0);
        let out = extract_crop(Some(&image), &position, &one_to_one_config()).unwrap();

        assert_eq!(out.source_rect.x, -120.0);
        assert_eq!(out.raster.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.raster.get_pixel(119, 119).0[3], 0);
        // Source pixel (10, 10)
        assert_eq!(out.raster.get_pixel(130, 130).0, [10, 64, 192, 255]);
        // Past the right/bottom edge of the 100px image
        assert_eq!(out.raster.get_pixel(239, 239).0[3], 0);
    }

    #[test]
    fn test_resample_region_identity() {
        let image = gradient_image(8, 4);
        let rect = SourceRect {
            x: 0.0,
            y: 0.0,
            width: 8.0,
            height: 4.0,
        };
        let out = resample_region(&image, &rect, 8, 4, FilterType::Bilinear);
        assert_eq!(out.as_raw(), &image.pixels);
    }

    #[test]
    fn test_resample_region_upscale_nearest() {
        let image = gradient_image(2, 1);
        let rect = SourceRect {
            x: 0.0,
            y: 0.0,
            width: 2.0,
            height: 1.0,
        };
        let out = resample_region(&image, &rect, 4, 2, FilterType::Nearest);
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        assert_eq!(out.get_pixel(1, 1).0[0], 0);
        assert_eq!(out.get_pixel(2, 0).0[0], 1);
        assert_eq!(out.get_pixel(3, 1).0[0], 1);
    }

    #[test]
    fn test_resample_region_zero_output() {
        let image = gradient_image(4, 4);
        let rect = SourceRect {
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 4.0,
        };
        let out = resample_region(&image, &rect, 0, 3, FilterType::Nearest);
        assert_eq!(out.as_raw().len(), 0);
    }

    #[test]
    fn test_zero_output_size_is_encode_error() {
        let image = gradient_image(10, 10);
        let config = EditorConfig {
            output_width: 0,
            ..EditorConfig::avatar()
        };
        let result = extract_crop(Some(&image), &ImagePosition::centered(1.0), &config);
        assert!(matches!(
            result,
            Err(ExtractError::Encode(EncodeError::InvalidDimensions { .. }))
        ));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
