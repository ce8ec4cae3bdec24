//! Pixel pan offsets and their relation to percentage anchors.

use serde::{Deserialize, Serialize};

use super::{checked_canvas, checked_dimensions, checked_scale, GeometryError};
use crate::position::ImagePosition;

/// Pixel offset applied to an image that is otherwise centred on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanOffset {
    pub x: f64,
    pub y: f64,
}

impl PanOffset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Constrain a proposed pan so the image can never leave the canvas entirely.
///
/// The bounds apply to the image's top-left draw position on each axis,
/// independently:
///
/// ```text
/// min = -(scaled_dimension - canvas / 2)
/// max = canvas / 2
/// ```
///
/// so the image always covers the canvas centre and an edge may approach,
/// but never vacate, the visible area. Expressed as an offset from the centred
/// placement this is `-scaled / 2 ..= scaled / 2`. Clamping is a projection:
/// applying it twice is the same as applying it once.
///
/// # Errors
///
/// Fails on zero image dimensions, a non-positive scale or canvas.
pub fn clamp_pan(
    proposed: PanOffset,
    image_width: u32,
    image_height: u32,
    scale: f64,
    canvas_size: f64,
) -> Result<PanOffset, GeometryError> {
    let (width, height) = checked_dimensions(image_width, image_height)?;
    let scale = checked_scale(scale)?;
    let canvas = checked_canvas(canvas_size)?;

    Ok(PanOffset {
        x: clamp_axis(proposed.x, width * scale, canvas),
        y: clamp_axis(proposed.y, height * scale, canvas),
    })
}

fn clamp_axis(offset: f64, scaled: f64, canvas: f64) -> f64 {
    let half = canvas / 2.0;
    let centered = (canvas - scaled) / 2.0;
    let min = -(scaled - half) - centered;
    let max = half - centered;
    if min > max {
        // Only reachable through rounding on degenerate sizes.
        return (min + max) / 2.0;
    }
    offset.clamp(min, max)
}

/// Convert a percentage anchor into a pixel pan offset.
///
/// The anchor names the image point at the canvas centre, so
/// `offset = (0.5 - anchor / 100) * scaled_dimension`.
pub fn offset_from_position(
    position: &ImagePosition,
    image_width: u32,
    image_height: u32,
) -> Result<PanOffset, GeometryError> {
    let (width, height) = checked_dimensions(image_width, image_height)?;
    let scale = checked_scale(position.scale())?;

    Ok(PanOffset {
        x: (0.5 - position.x / 100.0) * width * scale,
        y: (0.5 - position.y / 100.0) * height * scale,
    })
}

/// Convert a pixel pan offset back into a percentage anchor.
///
/// The resulting anchors are clamped into 0..=100; `zoom` is carried through
/// unchanged.
pub fn position_from_offset(
    offset: PanOffset,
    image_width: u32,
    image_height: u32,
    zoom: f64,
) -> Result<ImagePosition, GeometryError> {
    let (width, height) = checked_dimensions(image_width, image_height)?;
    let scale = checked_scale(zoom / 100.0)?;

    let x = 100.0 * (0.5 - offset.x / (width * scale));
    let y = 100.0 * (0.5 - offset.y / (height * scale));
    Ok(ImagePosition::new(x, y, zoom))
}
