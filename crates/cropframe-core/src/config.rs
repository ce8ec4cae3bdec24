//! Editor configuration and per-call-site presets.
//!
//! The avatar cropper and the generic image positioner share one geometry
//! engine; they differ only in crop aspect ratio and export size. Those
//! differences live here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::geometry::CropRegion;
use crate::position::ZoomRange;
use crate::render::Color;

/// Errors reported by [`EditorConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Canvas size must be positive, got {0}")]
    InvalidCanvas(f64),

    #[error("Crop fraction must be in (0, 1], got {0}")]
    InvalidCropFraction(f64),

    #[error("Aspect ratio must be positive, got {0}")]
    InvalidAspectRatio(f64),

    #[error("Output size must be non-zero, got {width}x{height}")]
    InvalidOutputSize { width: u32, height: u32 },

    #[error("Zoom range is invalid: {min}..={max}")]
    InvalidZoomRange { min: f64, max: f64 },

    #[error("Zoom step must be greater than 1, got {0}")]
    InvalidZoomStep(f64),
}

/// Configuration for one editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Edge length of the square preview canvas (px).
    pub canvas_size: f64,
    /// Crop window width as a fraction of the canvas edge.
    pub crop_fraction: f64,
    /// Crop window width / height.
    pub aspect_ratio: f64,
    /// Export raster width (px).
    pub output_width: u32,
    /// Export raster height (px).
    pub output_height: u32,
    /// Allowed zoom, as a scale factor.
    pub zoom_range: ZoomRange,
    /// Multiplicative step for zoom in / out.
    pub zoom_step: f64,
    /// JPEG quality for the exported artifact (1-100).
    pub jpeg_quality: u8,
    /// Resampling filter for preview and export.
    pub filter: FilterType,
    /// Shade drawn over the canvas outside the crop window.
    pub mask_color: Color,
    /// Crop border and corner marker colour.
    pub border_color: Color,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::avatar()
    }
}

impl EditorConfig {
    /// Square avatar crop exported at 512x512.
    pub fn avatar() -> Self {
        Self {
            canvas_size: 300.0,
            crop_fraction: 0.8,
            aspect_ratio: 1.0,
            output_width: 512,
            output_height: 512,
            zoom_range: ZoomRange::default(),
            zoom_step: 1.2,
            jpeg_quality: 90,
            filter: FilterType::Bilinear,
            mask_color: Color::rgba(0, 0, 0, 128),
            border_color: Color::rgba(255, 255, 255, 255),
        }
    }

    /// General-purpose square crop exported at 200x200.
    pub fn general() -> Self {
        Self {
            output_width: 200,
            output_height: 200,
            ..Self::avatar()
        }
    }

    /// Aspect-locked crop (e.g. 16:9 banners) exported at `output_width`
    /// wide with the height following the ratio.
    pub fn aspect_locked(aspect_ratio: f64, output_width: u32) -> Self {
        let output_height = (output_width as f64 / aspect_ratio).round().max(1.0) as u32;
        Self {
            aspect_ratio,
            output_width,
            output_height,
            ..Self::avatar()
        }
    }

    /// Look up a preset by name (`"avatar"` or `"general"`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "avatar" => Some(Self::avatar()),
            "general" => Some(Self::general()),
            _ => None,
        }
    }

    /// The crop window for this configuration.
    pub fn crop_region(&self) -> CropRegion {
        CropRegion::centered(self.canvas_size, self.crop_fraction, self.aspect_ratio)
    }

    /// Canvas edge rounded to whole pixels, for raster backends.
    pub fn canvas_pixels(&self) -> u32 {
        self.canvas_size.round().max(1.0) as u32
    }

    /// Reject configurations the geometry engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.canvas_size.is_finite() || self.canvas_size <= 0.0 {
            return Err(ConfigError::InvalidCanvas(self.canvas_size));
        }
        if !(self.crop_fraction > 0.0 && self.crop_fraction <= 1.0) {
            return Err(ConfigError::InvalidCropFraction(self.crop_fraction));
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.output_width == 0 || self.output_height == 0 {
            return Err(ConfigError::InvalidOutputSize {
                width: self.output_width,
                height: self.output_height,
            });
        }
        let range = self.zoom_range;
        if !(range.min > 0.0 && range.min.is_finite() && range.max.is_finite())
            || range.min > range.max
        {
            return Err(ConfigError::InvalidZoomRange {
                min: range.min,
                max: range.max,
            });
        }
        if !(self.zoom_step > 1.0 && self.zoom_step.is_finite()) {
            return Err(ConfigError::InvalidZoomStep(self.zoom_step));
        }
        Ok(())
    }
}
