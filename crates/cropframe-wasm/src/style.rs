//! Style projection bindings for displaying saved positions without a canvas.
//!
//! # Example
//!
//! ```typescript
//! import { project_style, style_to_css } from '@cropframe/wasm';
//!
//! Object.assign(img.style, project_style(saved, 'foreground'));
//! div.setAttribute('style', style_to_css(saved, 'background', 0.5, 8));
//! ```
//!
//! The optional `min_scale`/`max_scale` should match the zoom range the
//! position was edited with; omitted bounds use the default 0.1..=5.

use cropframe_core::style;
use cropframe_core::ZoomRange;
use wasm_bindgen::prelude::*;

use crate::types::render_mode_from_str;

/// Project a persisted position (JSON text) to a CSS property object.
///
/// Keys are camelCase (`objectFit`, `backgroundPosition`, ...) so the result
/// can be assigned straight onto `element.style`. Missing or malformed input
/// yields the "cover, centred" default.
#[wasm_bindgen]
pub fn project_style(
    json: Option<String>,
    mode: &str,
    min_scale: Option<f64>,
    max_scale: Option<f64>,
) -> Result<JsValue, JsValue> {
    let range = zoom_range(min_scale, max_scale);
    let descriptor = style::project_style_json(json.as_deref(), render_mode_from_str(mode), &range);
    serde_wasm_bindgen::to_value(&descriptor).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Same projection as an inline style string.
#[wasm_bindgen]
pub fn style_to_css(
    json: Option<String>,
    mode: &str,
    min_scale: Option<f64>,
    max_scale: Option<f64>,
) -> String {
    let range = zoom_range(min_scale, max_scale);
    style::project_style_json(json.as_deref(), render_mode_from_str(mode), &range).to_css()
}

/// Fill missing or unusable bounds from the default range.
fn zoom_range(min_scale: Option<f64>, max_scale: Option<f64>) -> ZoomRange {
    let default = ZoomRange::default();
    let min = min_scale
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default.min);
    let max = max_scale
        .filter(|v| v.is_finite() && *v >= min)
        .unwrap_or(default.max.max(min));
    ZoomRange::new(min, max)
}
