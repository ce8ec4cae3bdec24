//! Crop window geometry and the mapping from canvas space to source space.

use serde::{Deserialize, Serialize};

use super::pan::offset_from_position;
use super::{checked_canvas, checked_dimensions, checked_scale, GeometryError};
use crate::position::ImagePosition;

/// Axis-aligned rectangle with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True if the point lies inside the rectangle (right/bottom exclusive).
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Grow (or shrink, with a negative amount) every edge by `amount`.
    pub fn inflate(&self, amount: f64) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }
}

/// The fixed crop window, centred in the preview canvas.
///
/// Derived from the canvas size on every render; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Width in canvas pixels.
    pub width: f64,
    /// Height in canvas pixels.
    pub height: f64,
}

impl CropRegion {
    /// Build the crop window for a square canvas.
    ///
    /// The window is `fraction` of the canvas wide and `width / aspect_ratio`
    /// tall. Tall aspect ratios are shrunk so the window always fits.
    pub fn centered(canvas_size: f64, fraction: f64, aspect_ratio: f64) -> Self {
        let mut width = canvas_size * fraction;
        let mut height = width / aspect_ratio;
        if height > canvas_size * fraction {
            height = canvas_size * fraction;
            width = height * aspect_ratio;
        }

        Self {
            x: (canvas_size - width) / 2.0,
            y: (canvas_size - height) / 2.0,
            width,
            height,
        }
    }

    /// A square window of `crop_size` pixels.
    pub fn square(canvas_size: f64, crop_size: f64) -> Self {
        let offset = (canvas_size - crop_size) / 2.0;
        Self {
            x: offset,
            y: offset,
            width: crop_size,
            height: crop_size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Rectangle of the original, unscaled source image.
///
/// May extend past the image bounds when the user pans far enough.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceRect {
    /// True if the rectangle lies completely inside a `width x height` image.
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= width as f64
            && self.y + self.height <= height as f64
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Where the scaled image lands on the canvas for a given position.
///
/// Returns the destination rectangle `(draw_x, draw_y, width * scale,
/// height * scale)`.
pub fn image_placement(
    position: &ImagePosition,
    image_width: u32,
    image_height: u32,
    canvas_size: f64,
) -> Result<Rect, GeometryError> {
    let (width, height) = checked_dimensions(image_width, image_height)?;
    let scale = checked_scale(position.scale())?;
    let canvas = checked_canvas(canvas_size)?;
    let offset = offset_from_position(position, image_width, image_height)?;

    let scaled_w = width * scale;
    let scaled_h = height * scale;

    Ok(Rect {
        x: (canvas - scaled_w) / 2.0 + offset.x,
        y: (canvas - scaled_h) / 2.0 + offset.y,
        width: scaled_w,
        height: scaled_h,
    })
}

/// Compute the source rectangle visible through the crop window.
///
/// ```text
/// image_draw_x = (canvas - scaled_width) / 2 + offset_x
/// source_x     = (crop_x - image_draw_x) / scale
/// source_width = crop_width / scale
/// ```
///
/// and symmetrically for the vertical axis.
///
/// # Errors
///
/// Fails on zero image dimensions, a non-positive zoom or canvas.
pub fn to_source_rect(
    position: &ImagePosition,
    image_width: u32,
    image_height: u32,
    canvas_size: f64,
    crop: &CropRegion,
) -> Result<SourceRect, GeometryError> {
    let placement = image_placement(position, image_width, image_height, canvas_size)?;
    let scale = position.scale();

    Ok(SourceRect {
        x: (crop.x - placement.x) / scale,
        y: (crop.y - placement.y) / scale,
        width: crop.width / scale,
        height: crop.height / scale,
    })
}
