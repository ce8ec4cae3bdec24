//! Initial fit-to-cover placement for a freshly loaded image.

use super::{checked_canvas, checked_dimensions, GeometryError};
use crate::position::{ImagePosition, ZoomRange};

/// Choose the starting position for a newly loaded image.
///
/// The image is centred and scaled so that its shorter dimension exactly
/// fills the canvas (fit-to-cover):
///
/// - landscape (`width > height`): the height fills the canvas
/// - portrait and square: the width fills the canvas
///
/// The resulting scale is clamped into `range`, so a tiny thumbnail is not
/// blown up past the maximum and a huge photo never drops below the floor.
/// Coverage therefore only holds when `canvas_size / shorter_edge` is at most
/// `range.max`; an image fitted at the maximum stays smaller than the canvas.
///
/// # Arguments
///
/// * `image_width`, `image_height` - Source dimensions in pixels
/// * `canvas_size` - Edge length of the square preview canvas
/// * `range` - Allowed scale range
///
/// # Errors
///
/// `GeometryError::InvalidImage` for zero dimensions and
/// `GeometryError::InvalidCanvas` for a non-positive canvas.
///
/// # Example
///
/// ```ignore
/// // 4000x2000 landscape into a 300px canvas: the height fills it
/// let pos = compute_initial_fit(4000, 2000, 300.0, &ZoomRange::default())?;
/// assert!((pos.scale() - 0.15).abs() < 1e-12);
/// ```
pub fn compute_initial_fit(
    image_width: u32,
    image_height: u32,
    canvas_size: f64,
    range: &ZoomRange,
) -> Result<ImagePosition, GeometryError> {
    let (width, height) = checked_dimensions(image_width, image_height)?;
    let canvas = checked_canvas(canvas_size)?;

    let covering_edge = if width > height { height } else { width };
    let scale = range.clamp_scale(canvas / covering_edge);

    Ok(ImagePosition::centered(scale))
}
