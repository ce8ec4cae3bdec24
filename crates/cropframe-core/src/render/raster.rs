//! Software backend that executes [`DrawCommand`]s into an RGBA raster.

use image::RgbaImage;

use super::commands::DrawCommand;
use super::sample::sample;
use crate::decode::{FilterType, SourceImage};
use crate::geometry::Rect;

/// Execute `commands` on a fresh `size x size` transparent surface.
///
/// `DrawImage` commands need `source`; they are skipped when it is `None`.
/// All fills composite source-over; pixels are covered when their centre
/// lies inside a rectangle.
pub fn rasterize(
    commands: &[DrawCommand],
    source: Option<&SourceImage>,
    size: u32,
    filter: FilterType,
) -> RgbaImage {
    let mut surface = RgbaImage::new(size, size);

    for command in commands {
        match command {
            DrawCommand::Clear { .. } => {
                for px in surface.pixels_mut() {
                    px.0 = [0, 0, 0, 0];
                }
            }
            DrawCommand::DrawImage { dest } => match source {
                Some(image) => draw_image(&mut surface, image, dest, filter),
                None => log::warn!("draw image command without a loaded source"),
            },
            DrawCommand::FillRect { rect, color } => {
                fill_rect(&mut surface, rect, color.to_array());
            }
            DrawCommand::StrokeRect {
                rect,
                color,
                line_width,
            } => {
                let rgba = color.to_array();
                for band in stroke_bands(rect, *line_width) {
                    fill_rect(&mut surface, &band, rgba);
                }
            }
        }
    }

    surface
}

/// Draw the whole source scaled into `dest`.
fn draw_image(surface: &mut RgbaImage, image: &SourceImage, dest: &Rect, filter: FilterType) {
    if dest.width <= 0.0 || dest.height <= 0.0 {
        return;
    }
    let step_x = image.width as f64 / dest.width;
    let step_y = image.height as f64 / dest.height;

    let (x0, x1) = pixel_span(dest.x, dest.right(), surface.width());
    let (y0, y1) = pixel_span(dest.y, dest.bottom(), surface.height());

    for py in y0..y1 {
        let v = (py as f64 + 0.5 - dest.y) * step_y;
        for px in x0..x1 {
            let u = (px as f64 + 0.5 - dest.x) * step_x;
            let src = sample(image, u, v, filter);
            let dst = surface.get_pixel_mut(px, py);
            dst.0 = blend_over(dst.0, src);
        }
    }
}

fn fill_rect(surface: &mut RgbaImage, rect: &Rect, rgba: [u8; 4]) {
    let (x0, x1) = pixel_span(rect.x, rect.right(), surface.width());
    let (y0, y1) = pixel_span(rect.y, rect.bottom(), surface.height());

    for py in y0..y1 {
        for px in x0..x1 {
            let dst = surface.get_pixel_mut(px, py);
            dst.0 = blend_over(dst.0, rgba);
        }
    }
}

/// Decompose a centred stroke into four non-overlapping filled bands.
fn stroke_bands(rect: &Rect, line_width: f64) -> [Rect; 4] {
    let outer = rect.inflate(line_width / 2.0);
    let inner = rect.inflate(-line_width / 2.0);
    [
        Rect::new(outer.x, outer.y, outer.width, line_width),
        Rect::new(outer.x, inner.bottom(), outer.width, line_width),
        Rect::new(outer.x, inner.y, line_width, inner.height),
        Rect::new(inner.right(), inner.y, line_width, inner.height),
    ]
}

/// Range of pixel indices whose centres fall in `[start, end)`.
fn pixel_span(start: f64, end: f64, limit: u32) -> (u32, u32) {
    let lo = (start - 0.5).ceil().max(0.0);
    let hi = (end - 0.5).ceil().min(limit as f64);
    if lo >= hi {
        return (0, 0);
    }
    (lo as u32, hi as u32)
}

/// Source-over compositing on straight alpha.
fn blend_over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    let sa = src[3] as f64 / 255.0;
    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for c in 0..3 {
        let value = (src[c] as f64 * sa + dst[c] as f64 * da * (1.0 - sa)) / out_a;
        out[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}
