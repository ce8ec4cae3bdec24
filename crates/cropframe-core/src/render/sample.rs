//! Pixel sampling shared by the preview rasterizer and crop extraction.
//!
//! Both paths map a destination pixel centre back into continuous source
//! coordinates and call [`sample`], which is what makes the crop window of
//! the preview and the exported raster agree pixel for pixel.
//!
//! Source coordinates use the pixel-area convention: pixel `i` covers
//! `[i, i + 1)`. Anything outside `[0, width) x [0, height)` samples as fully
//! transparent, mirroring how a canvas clips `drawImage` at the image edge.

use crate::decode::{FilterType, SourceImage};

/// Fully transparent black, returned for samples outside the image.
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Sample the source at continuous coordinates `(u, v)`.
#[inline]
pub fn sample(image: &SourceImage, u: f64, v: f64, filter: FilterType) -> [u8; 4] {
    let (w, h) = (image.width as f64, image.height as f64);
    if !(u >= 0.0 && u < w && v >= 0.0 && v < h) {
        return TRANSPARENT;
    }

    match filter {
        FilterType::Nearest => image.pixel(u as u32, v as u32),
        FilterType::Bilinear => sample_bilinear(image, u, v),
    }
}

/// Bilinear interpolation of the 4 nearest pixel centres.
///
/// Neighbours past the image edge are clamped to the edge pixel, so an
/// in-bounds sample never blends in transparency.
fn sample_bilinear(image: &SourceImage, u: f64, v: f64) -> [u8; 4] {
    let max_x = image.width as i64 - 1;
    let max_y = image.height as i64 - 1;

    // Shift to pixel-centre coordinates
    let cx = u - 0.5;
    let cy = v - 0.5;
    let x0 = cx.floor();
    let y0 = cy.floor();
    let fx = cx - x0;
    let fy = cy - y0;

    let x0i = (x0 as i64).clamp(0, max_x) as u32;
    let y0i = (y0 as i64).clamp(0, max_y) as u32;
    let x1i = (x0 as i64 + 1).clamp(0, max_x) as u32;
    let y1i = (y0 as i64 + 1).clamp(0, max_y) as u32;

    let p00 = image.pixel(x0i, y0i);
    let p10 = image.pixel(x1i, y0i);
    let p01 = image.pixel(x0i, y1i);
    let p11 = image.pixel(x1i, y1i);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
        let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
        let value = top * (1.0 - fy) + bottom * fy;
        out[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    out
}
