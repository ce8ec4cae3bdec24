//! Crop editor WASM bindings.
//!
//! [`JsCropEditor`] wraps one [`EditorSession`]. The host forwards pointer
//! events in canvas coordinates (and keeps forwarding moves from the whole
//! window while a drag is active), then redraws from either
//! [`JsCropEditor::preview_rgba`] or [`JsCropEditor::draw_commands`].
//!
//! # Example
//!
//! ```typescript
//! import { JsCropEditor } from '@cropframe/wasm';
//!
//! const editor = new JsCropEditor('avatar');
//! editor.load_bytes(new Uint8Array(await file.arrayBuffer()));
//!
//! canvas.onpointerdown = (e) => editor.pointer_down(e.offsetX, e.offsetY);
//! window.onpointermove = (e) => editor.pointer_move(e.offsetX, e.offsetY);
//! window.onpointerup = () => editor.pointer_up();
//!
//! const crop = editor.extract();
//! const blob = new Blob([crop.jpeg], { type: 'image/jpeg' });
//! ```

use cropframe_core::decode::decode_image;
use cropframe_core::{EditorConfig, EditorSession, ImagePosition, PositionFormat, SourceImage};
use wasm_bindgen::prelude::*;

use crate::types::{render_mode_from_str, JsCropOutput};

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Interactive pan/zoom/crop session for JavaScript.
#[wasm_bindgen]
pub struct JsCropEditor {
    inner: EditorSession,
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Create an editor from a preset name (`"avatar"` or `"general"`).
    ///
    /// Defaults to `"avatar"` when no name is given.
    #[wasm_bindgen(constructor)]
    pub fn new(preset: Option<String>) -> Result<JsCropEditor, JsValue> {
        let name = preset.as_deref().unwrap_or("avatar");
        let config = EditorConfig::preset(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown editor preset: {}", name)))?;
        Self::from_core_config(config)
    }

    /// Create an editor from a full configuration object.
    ///
    /// Missing fields take the avatar preset's values.
    pub fn with_config(config: JsValue) -> Result<JsCropEditor, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?;
        Self::from_core_config(config)
    }

    /// Decode JPEG/PNG bytes and load them, applying the initial fit.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let image = decode_image(bytes).map_err(to_js)?;
        self.inner.load(image).map_err(to_js)
    }

    /// Load an already decoded RGBA raster (e.g. from `ImageData`).
    pub fn load_rgba(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> Result<(), JsValue> {
        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            return Err(JsValue::from_str(&format!(
                "Invalid pixel data: expected {} bytes (width * height * 4), got {}",
                expected,
                pixels.len()
            )));
        }
        self.inner
            .load(SourceImage::new(width, height, pixels))
            .map_err(to_js)
    }

    /// Drop the loaded image.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Preview canvas edge in whole pixels.
    #[wasm_bindgen(getter)]
    pub fn canvas_size(&self) -> u32 {
        self.inner.config().canvas_pixels()
    }

    // ------------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------------

    /// Returns true when a drag started.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_down(x, y)
    }

    /// Returns true when the pan changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        self.inner.pointer_move(x, y).map_err(to_js)
    }

    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.inner.is_dragging()
    }

    // ------------------------------------------------------------------------
    // Zoom (all return the new zoom in percent)
    // ------------------------------------------------------------------------

    pub fn zoom_in(&mut self) -> Result<f64, JsValue> {
        self.inner.zoom_in().map(|p| p.zoom).map_err(to_js)
    }

    pub fn zoom_out(&mut self) -> Result<f64, JsValue> {
        self.inner.zoom_out().map(|p| p.zoom).map_err(to_js)
    }

    pub fn reset_zoom(&mut self) -> Result<f64, JsValue> {
        self.inner.reset_zoom().map(|p| p.zoom).map_err(to_js)
    }

    pub fn set_zoom(&mut self, percent: f64) -> Result<f64, JsValue> {
        self.inner.set_zoom(percent).map(|p| p.zoom).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.position().zoom
    }

    // ------------------------------------------------------------------------
    // Position persistence
    // ------------------------------------------------------------------------

    /// Current position as JSON: `{x, y, zoom}`, or `{x, y, scale}` when
    /// `format` is `"scale"`.
    pub fn position_json(&self, format: Option<String>) -> Result<String, JsValue> {
        let format = match format.as_deref() {
            Some("scale") => PositionFormat::Scale,
            _ => PositionFormat::Zoom,
        };
        self.inner.position().to_json(format).map_err(to_js)
    }

    /// Restore a persisted position. Malformed JSON is an error here.
    pub fn set_position_json(&mut self, json: &str) -> Result<(), JsValue> {
        let position = ImagePosition::from_json(json).map_err(to_js)?;
        self.inner.set_position(position).map(|_| ()).map_err(to_js)
    }

    /// CSS projection of the current position using this editor's zoom
    /// range, as an inline style string.
    pub fn style_css(&self, mode: &str) -> String {
        self.inner.project_style(render_mode_from_str(mode)).to_css()
    }

    // ------------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------------

    /// Software-rendered preview as RGBA bytes, `canvas_size` square.
    pub fn preview_rgba(&self) -> Result<Vec<u8>, JsValue> {
        let preview = self.inner.render_preview().map_err(to_js)?;
        Ok(preview.into_raw())
    }

    /// Preview as an array of draw commands for a 2D canvas context.
    pub fn draw_commands(&self) -> Result<JsValue, JsValue> {
        let commands = self.inner.render_commands().map_err(to_js)?;
        serde_wasm_bindgen::to_value(&commands).map_err(to_js)
    }

    /// Extract and encode the crop at the configured output size.
    pub fn extract(&self) -> Result<JsCropOutput, JsValue> {
        let output = self.inner.extract().map_err(to_js)?;
        Ok(JsCropOutput::from_output(output))
    }
}

impl JsCropEditor {
    fn from_core_config(config: EditorConfig) -> Result<JsCropEditor, JsValue> {
        let inner = EditorSession::new(config).map_err(to_js)?;
        Ok(JsCropEditor { inner })
    }
}

/// WASM-specific tests that require JsValue.
///
/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn loaded_editor() -> JsCropEditor {
        let mut editor = JsCropEditor::new(None).unwrap();
        editor
            .load_rgba(400, 200, vec![200u8; 400 * 200 * 4])
            .unwrap();
        editor
    }

    #[wasm_bindgen_test]
    fn test_unknown_preset_fails() {
        assert!(JsCropEditor::new(Some("poster".to_string())).is_err());
    }

    #[wasm_bindgen_test]
    fn test_load_rgba_validates_length() {
        let mut editor = JsCropEditor::new(None).unwrap();
        assert!(editor.load_rgba(10, 10, vec![0u8; 10]).is_err());
        assert!(!editor.has_image());
    }

    #[wasm_bindgen_test]
    fn test_drag_and_zoom() {
        let mut editor = loaded_editor();
        assert!(editor.pointer_down(150.0, 150.0));
        assert!(editor.pointer_move(170.0, 150.0).unwrap());
        editor.pointer_up();
        assert!(!editor.is_dragging());

        let zoom = editor.zoom_in().unwrap();
        assert!(zoom > 150.0);
        let reset = editor.reset_zoom().unwrap();
        assert!((reset - 150.0).abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn test_position_json_round_trip() {
        let mut editor = loaded_editor();
        editor
            .set_position_json(r#"{"x": 30, "y": 60, "scale": 2}"#)
            .unwrap();
        let json = editor.position_json(Some("scale".to_string())).unwrap();
        assert!(json.contains("\"scale\":2"));
        assert!(editor.set_position_json("not json").is_err());
        assert_eq!(
            editor.style_css("background"),
            "background-size: 200%; background-position: 30% 60%"
        );
    }

    #[wasm_bindgen_test]
    fn test_preview_and_commands() {
        let editor = loaded_editor();
        let rgba = editor.preview_rgba().unwrap();
        assert_eq!(rgba.len(), 300 * 300 * 4);
        assert!(editor.draw_commands().unwrap().is_object());
    }

    #[wasm_bindgen_test]
    fn test_extract() {
        let editor = loaded_editor();
        let crop = editor.extract().unwrap();
        assert_eq!((crop.width(), crop.height()), (512, 512));
        assert!(crop.data_url().starts_with("data:image/jpeg;base64,"));
        assert!(crop.jpeg().length() > 0);
    }

    #[wasm_bindgen_test]
    fn test_extract_without_image_fails() {
        let editor = JsCropEditor::new(None).unwrap();
        assert!(editor.extract().is_err());
    }
}
