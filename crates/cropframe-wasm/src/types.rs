//! WASM-compatible wrapper types for crop results.

use cropframe_core::extract::CropOutput;
use cropframe_core::style::RenderMode;
use wasm_bindgen::prelude::*;

/// An extracted crop for JavaScript.
///
/// Holds the JPEG bytes for upload and the data URL for an instant preview.
/// Both come from the same extraction, so they always show the same pixels.
#[wasm_bindgen]
pub struct JsCropOutput {
    width: u32,
    height: u32,
    jpeg: Vec<u8>,
    data_url: String,
    rgba: Vec<u8>,
}

#[wasm_bindgen]
impl JsCropOutput {
    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// JPEG bytes as a `Uint8Array`, ready to wrap in a `Blob`.
    ///
    /// Note: this copies the bytes out of WASM memory.
    #[wasm_bindgen(getter)]
    pub fn jpeg(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.jpeg.as_slice())
    }

    /// `data:image/jpeg;base64,...` form of the same bytes
    #[wasm_bindgen(getter)]
    pub fn data_url(&self) -> String {
        self.data_url.clone()
    }

    /// Unencoded RGBA raster (4 bytes per pixel), e.g. for `ImageData`.
    pub fn rgba(&self) -> Vec<u8> {
        self.rgba.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsCropOutput {
    pub(crate) fn from_output(output: CropOutput) -> Self {
        Self {
            width: output.width(),
            height: output.height(),
            jpeg: output.jpeg,
            data_url: output.data_url,
            rgba: output.raster.into_raw(),
        }
    }

    #[cfg(test)]
    pub(crate) fn jpeg_bytes(&self) -> &[u8] {
        &self.jpeg
    }
}

/// Parse a render mode name, falling back to foreground.
///
/// Style projection never fails, so an unknown mode is logged rather than
/// rejected.
pub(crate) fn render_mode_from_str(mode: &str) -> RenderMode {
    RenderMode::from_name(mode).unwrap_or_else(|| {
        log::warn!("Unknown render mode {:?}, using foreground", mode);
        RenderMode::Foreground
    })
}
