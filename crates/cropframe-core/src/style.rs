//! CSS-equivalent positioning for contexts that display the image directly.
//!
//! A stored [`ImagePosition`] is projected onto either `<img>` layout
//! primitives (`object-fit`, `object-position`, `transform`) or background
//! primitives (`background-size`, `background-position`), so a saved
//! position looks the same as it did in the editor without resampling.
//!
//! Projection runs on every render of possibly stale data, so it never
//! fails: absent or malformed input yields the default "cover, centred"
//! descriptor and a warning in the log.

use serde::{Deserialize, Serialize};

use crate::position::{ImagePosition, ZoomRange};

// ============================================================================
// Render Mode
// ============================================================================

/// Which layout primitives the consumer renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// An `<img>` element (`object-*` properties).
    #[default]
    #[serde(alias = "foreground-image")]
    Foreground,
    /// A CSS `background-image`.
    #[serde(alias = "background-image")]
    Background,
}

impl RenderMode {
    /// Parse a mode name. Accepts `foreground`/`foreground-image`/`img` and
    /// `background`/`background-image`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "foreground" | "foreground-image" | "img" => Some(RenderMode::Foreground),
            "background" | "background-image" => Some(RenderMode::Background),
            _ => None,
        }
    }
}

// ============================================================================
// Style Descriptor
// ============================================================================

/// CSS key/value pairs describing how to display the image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum StyleDescriptor {
    Foreground {
        object_fit: String,
        object_position: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        transform: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        transform_origin: Option<String>,
    },
    Background {
        background_size: String,
        background_position: String,
    },
}

impl StyleDescriptor {
    /// The fallback: cover the box, centred.
    pub fn default_for(mode: RenderMode) -> Self {
        match mode {
            RenderMode::Foreground => StyleDescriptor::Foreground {
                object_fit: "cover".to_string(),
                object_position: "50% 50%".to_string(),
                transform: None,
                transform_origin: None,
            },
            RenderMode::Background => StyleDescriptor::Background {
                background_size: "cover".to_string(),
                background_position: "50% 50%".to_string(),
            },
        }
    }

    pub fn mode(&self) -> RenderMode {
        match self {
            StyleDescriptor::Foreground { .. } => RenderMode::Foreground,
            StyleDescriptor::Background { .. } => RenderMode::Background,
        }
    }

    /// Ordered `(property, value)` pairs using CSS property names.
    pub fn declarations(&self) -> Vec<(&'static str, &str)> {
        match self {
            StyleDescriptor::Foreground {
                object_fit,
                object_position,
                transform,
                transform_origin,
            } => {
                let mut decls = vec![
                    ("object-fit", object_fit.as_str()),
                    ("object-position", object_position.as_str()),
                ];
                if let Some(transform) = transform {
                    decls.push(("transform", transform.as_str()));
                }
                if let Some(origin) = transform_origin {
                    decls.push(("transform-origin", origin.as_str()));
                }
                decls
            }
            StyleDescriptor::Background {
                background_size,
                background_position,
            } => vec![
                ("background-size", background_size.as_str()),
                ("background-position", background_position.as_str()),
            ],
        }
    }

    /// Inline style string, e.g. `object-fit: cover; object-position: 50% 50%`.
    pub fn to_css(&self) -> String {
        self.declarations()
            .iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ============================================================================
// Projection
// ============================================================================

/// Project a position onto style declarations for `mode`.
///
/// `None` yields the default descriptor. The zoom is clamped into `range`
/// before projecting; pass the range the position was edited with so the
/// projection matches the editor.
pub fn project_style(
    position: Option<&ImagePosition>,
    mode: RenderMode,
    range: &ZoomRange,
) -> StyleDescriptor {
    let Some(position) = position else {
        return StyleDescriptor::default_for(mode);
    };
    let position = position.clamped(range);
    let anchor = format!("{}% {}%", format_number(position.x), format_number(position.y));

    match (mode, position.is_unzoomed()) {
        (RenderMode::Foreground, true) => StyleDescriptor::Foreground {
            object_fit: "cover".to_string(),
            object_position: anchor,
            transform: None,
            transform_origin: None,
        },
        (RenderMode::Foreground, false) => StyleDescriptor::Foreground {
            object_fit: "none".to_string(),
            object_position: anchor.clone(),
            transform: Some(format!("scale({})", format_number(position.scale()))),
            transform_origin: Some(anchor),
        },
        (RenderMode::Background, true) => StyleDescriptor::Background {
            background_size: "cover".to_string(),
            background_position: anchor,
        },
        (RenderMode::Background, false) => StyleDescriptor::Background {
            background_size: format!("{}%", format_number(position.zoom)),
            background_position: anchor,
        },
    }
}

/// Project a persisted JSON position; soft-fails to the default descriptor.
///
/// `None`, an empty string and JSON `null` mean "no stored position". Text
/// that does not parse as a position is logged and treated the same way.
pub fn project_style_json(
    json: Option<&str>,
    mode: RenderMode,
    range: &ZoomRange,
) -> StyleDescriptor {
    let text = match json.map(str::trim) {
        None | Some("") => return StyleDescriptor::default_for(mode),
        Some(text) => text,
    };

    match serde_json::from_str::<Option<ImagePosition>>(text) {
        Ok(position) => project_style(position.as_ref(), mode, range),
        Err(e) => {
            log::warn!("Ignoring malformed image position {:?}: {}", text, e);
            StyleDescriptor::default_for(mode)
        }
    }
}

/// Format with up to 3 decimals, trailing zeros trimmed.
fn format_number(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        return "0".to_string();
    }
    text.to_string()
}


// ============================================================================
// Property-Based Tests
// ============================================================================
