//! Cropframe Core - Image geometry and crop engine
//!
//! This crate provides the pan/zoom/crop engine behind Cropframe's avatar
//! cropper and image positioner: coordinate mapping between editor space and
//! source pixels, a pure preview render function, resolution-independent crop
//! export and CSS style projection of stored positions.

pub mod config;
pub mod decode;
pub mod editor;
pub mod encode;
pub mod extract;
pub mod geometry;
pub mod position;
pub mod render;
pub mod style;

pub use config::{ConfigError, EditorConfig};
pub use decode::{decode_image, DecodeError, FilterType, SourceImage, UploadError, UploadPolicy};
pub use editor::{DragState, EditorSession};
pub use encode::{encode_jpeg, to_data_url, EncodeError};
pub use extract::{extract_crop, resample_region, CropOutput, ExtractError};
pub use geometry::{
    clamp_pan, compute_initial_fit, to_source_rect, CropRegion, GeometryError, PanOffset, Rect,
    SourceRect,
};
pub use position::{ImagePosition, PositionError, PositionFormat, ZoomRange};
pub use render::{preview_commands, rasterize, Color, DrawCommand};
pub use style::{project_style, project_style_json, RenderMode, StyleDescriptor};
