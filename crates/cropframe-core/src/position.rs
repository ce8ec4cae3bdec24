//! The persisted pan/zoom state of an image inside a crop frame.
//!
//! # Coordinate System
//!
//! - `x` / `y` are percentages (0 to 100) of the source image width / height.
//!   They name the image point that sits at the centre of the crop window.
//! - `zoom` is a percentage of the source pixel size: `zoom = 100` draws one
//!   source pixel per canvas pixel. The equivalent factor form is
//!   `scale = zoom / 100`.
//!
//! Positions are stored by the surrounding application as JSON, either as
//! `{x, y, zoom}` or `{x, y, scale}`. Both shapes are accepted on input; the
//! output shape is chosen with [`PositionFormat`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance used when comparing zoom percentages.
const ZOOM_EPSILON: f64 = 1e-9;

/// Errors produced while reading or writing a persisted position.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PositionError {
    /// The serialized position could not be parsed.
    #[error("Malformed position: {0}")]
    Malformed(String),

    /// A field parsed but holds an unusable value.
    #[error("Invalid position field `{field}`: {value}")]
    InvalidField { field: &'static str, value: f64 },

    /// Serialization failed.
    #[error("Failed to serialize position: {0}")]
    Serialize(String),
}

/// Allowed range for the zoom factor (scale form).
///
/// Values outside the range are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    /// Smallest allowed scale factor.
    pub min: f64,
    /// Largest allowed scale factor.
    pub max: f64,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self { min: 0.1, max: 5.0 }
    }
}

impl ZoomRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a scale factor into the range.
    ///
    /// Non-finite input collapses to the nearest meaningful bound so callers
    /// never receive NaN back.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.clamp(self.min, self.max)
    }

    /// Clamp a zoom percentage into the range.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        self.clamp_scale(zoom / 100.0) * 100.0
    }

    /// Check whether a scale factor lies inside the range.
    pub fn contains(&self, scale: f64) -> bool {
        scale >= self.min && scale <= self.max
    }
}

/// JSON shape to use when persisting a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionFormat {
    /// `{ "x": .., "y": .., "zoom": .. }` with zoom in percent.
    #[default]
    Zoom,
    /// `{ "x": .., "y": .., "scale": .. }` with scale as a factor.
    Scale,
}

/// Pan and zoom of an image inside a crop frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PersistedPosition")]
pub struct ImagePosition {
    /// Horizontal anchor, percent of image width (0 to 100).
    pub x: f64,
    /// Vertical anchor, percent of image height (0 to 100).
    pub y: f64,
    /// Magnification in percent; 100 means no magnification.
    pub zoom: f64,
}

impl Default for ImagePosition {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            zoom: 100.0,
        }
    }
}

impl ImagePosition {
    /// Create a position from percentages, clamping `x` and `y` into 0..=100.
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self {
            x: clamp_percent(x),
            y: clamp_percent(y),
            zoom,
        }
    }

    /// Create a position from a scale factor instead of a zoom percentage.
    pub fn from_scale(x: f64, y: f64, scale: f64) -> Self {
        Self::new(x, y, scale * 100.0)
    }

    /// A centred position at the given scale factor.
    pub fn centered(scale: f64) -> Self {
        Self::from_scale(50.0, 50.0, scale)
    }

    /// Zoom expressed as a factor (`zoom / 100`).
    #[inline]
    pub fn scale(&self) -> f64 {
        self.zoom / 100.0
    }

    /// Return a copy with a different scale factor.
    pub fn with_scale(self, scale: f64) -> Self {
        Self {
            zoom: scale * 100.0,
            ..self
        }
    }

    /// Return a copy with anchors in 0..=100 and zoom inside `range`.
    pub fn clamped(self, range: &ZoomRange) -> Self {
        Self {
            x: clamp_percent(self.x),
            y: clamp_percent(self.y),
            zoom: range.clamp_zoom(self.zoom),
        }
    }

    /// True when the position applies no magnification.
    pub fn is_unzoomed(&self) -> bool {
        (self.zoom - 100.0).abs() < ZOOM_EPSILON
    }

    /// Parse a persisted position from JSON text.
    ///
    /// Accepts `{x, y, zoom}` and `{x, y, scale}`. A missing zoom/scale means
    /// no magnification.
    pub fn from_json(text: &str) -> Result<Self, PositionError> {
        serde_json::from_str(text).map_err(|e| PositionError::Malformed(e.to_string()))
    }

    /// Serialize the position as JSON in the requested shape.
    pub fn to_json(&self, format: PositionFormat) -> Result<String, PositionError> {
        let result = match format {
            PositionFormat::Zoom => serde_json::to_string(self),
            PositionFormat::Scale => serde_json::to_string(&ScaledPosition {
                x: self.x,
                y: self.y,
                scale: self.scale(),
            }),
        };
        result.map_err(|e| PositionError::Serialize(e.to_string()))
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 50.0;
    }
    value.clamp(0.0, 100.0)
}

/// Wire shape accepted when deserializing.
#[derive(Deserialize)]
struct PersistedPosition {
    x: f64,
    y: f64,
    #[serde(default)]
    zoom: Option<f64>,
    #[serde(default)]
    scale: Option<f64>,
}

/// Wire shape for [`PositionFormat::Scale`].
#[derive(Serialize)]
struct ScaledPosition {
    x: f64,
    y: f64,
    scale: f64,
}

impl TryFrom<PersistedPosition> for ImagePosition {
    type Error = PositionError;

    fn try_from(raw: PersistedPosition) -> Result<Self, Self::Error> {
        if !raw.x.is_finite() {
            return Err(PositionError::InvalidField {
                field: "x",
                value: raw.x,
            });
        }
        if !raw.y.is_finite() {
            return Err(PositionError::InvalidField {
                field: "y",
                value: raw.y,
            });
        }

        let (field, zoom) = match (raw.zoom, raw.scale) {
            (Some(zoom), _) => ("zoom", zoom),
            (None, Some(scale)) => ("scale", scale * 100.0),
            (None, None) => ("zoom", 100.0),
        };
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(PositionError::InvalidField { field, value: zoom });
        }

        Ok(ImagePosition::new(raw.x, raw.y, zoom))
    }
}
