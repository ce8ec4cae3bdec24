//! The pure preview render function and the commands it emits.

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::geometry::{image_placement, GeometryError, Rect};
use crate::position::ImagePosition;

/// Width of the crop border stroke (px).
pub const BORDER_WIDTH: f64 = 2.0;
/// Length of each corner marker arm (px).
pub const MARKER_LENGTH: f64 = 20.0;
/// Thickness of each corner marker arm (px).
pub const MARKER_THICKNESS: f64 = 3.0;

/// Straight (non-premultiplied) RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS `rgba()` form, e.g. `rgba(0, 0, 0, 0.502)`.
    pub fn to_css(self) -> String {
        let alpha = self.a as f64 / 255.0;
        let alpha = format!("{:.3}", alpha);
        let alpha = alpha.trim_end_matches('0').trim_end_matches('.');
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// One drawing step for a 2D canvas-like surface.
///
/// The command list is backend-agnostic: [`rasterize`](super::rasterize)
/// executes it in software, and a browser host can replay it on a
/// `CanvasRenderingContext2D`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DrawCommand {
    /// Reset the whole surface to transparent.
    Clear { width: f64, height: f64 },
    /// Draw the full source image scaled into `dest`.
    DrawImage { dest: Rect },
    /// Fill a rectangle, compositing source-over.
    FillRect { rect: Rect, color: Color },
    /// Stroke a rectangle outline centred on its edges.
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f64,
    },
}

/// Build the preview for the current state.
///
/// Emits, in order: a clear, the image (when `image_size` is `Some`), four
/// mask bands around the crop window, the crop border and eight corner
/// marker arms. The mask bands never cover the crop window itself.
///
/// # Errors
///
/// Propagates geometry errors for invalid image dimensions or zoom.
pub fn preview_commands(
    image_size: Option<(u32, u32)>,
    position: &ImagePosition,
    config: &EditorConfig,
) -> Result<Vec<DrawCommand>, GeometryError> {
    let canvas = config.canvas_size;
    let crop = config.crop_region().rect();

    let mut commands = Vec::with_capacity(15);
    commands.push(DrawCommand::Clear {
        width: canvas,
        height: canvas,
    });

    if let Some((width, height)) = image_size {
        let dest = image_placement(position, width, height, canvas)?;
        commands.push(DrawCommand::DrawImage { dest });
    }

    for band in mask_bands(canvas, &crop) {
        commands.push(DrawCommand::FillRect {
            rect: band,
            color: config.mask_color,
        });
    }

    commands.push(DrawCommand::StrokeRect {
        rect: crop,
        color: config.border_color,
        line_width: BORDER_WIDTH,
    });

    for arm in corner_markers(&crop) {
        commands.push(DrawCommand::FillRect {
            rect: arm,
            color: config.border_color,
        });
    }

    Ok(commands)
}

/// Top, bottom, left and right bands outside the crop window.
fn mask_bands(canvas: f64, crop: &Rect) -> [Rect; 4] {
    [
        Rect::new(0.0, 0.0, canvas, crop.y),
        Rect::new(0.0, crop.bottom(), canvas, canvas - crop.bottom()),
        Rect::new(0.0, crop.y, crop.x, crop.height),
        Rect::new(crop.right(), crop.y, canvas - crop.right(), crop.height),
    ]
}

/// L-shaped markers inside each corner of the crop window.
fn corner_markers(crop: &Rect) -> Vec<Rect> {
    let len = MARKER_LENGTH.min(crop.width / 2.0).min(crop.height / 2.0);
    let t = MARKER_THICKNESS.min(len);
    let (left, top) = (crop.x, crop.y);
    let (right, bottom) = (crop.right(), crop.bottom());

    vec![
        // top-left
        Rect::new(left, top, len, t),
        Rect::new(left, top, t, len),
        // top-right
        Rect::new(right - len, top, len, t),
        Rect::new(right - t, top, t, len),
        // bottom-left
        Rect::new(left, bottom - t, len, t),
        Rect::new(left, bottom - len, t, len),
        // bottom-right
        Rect::new(right - len, bottom - t, len, t),
        Rect::new(right - t, bottom - len, t, len),
    ]
}
