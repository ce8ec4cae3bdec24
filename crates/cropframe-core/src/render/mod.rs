//! Live preview rendering for the crop editor.
//!
//! Rendering is split in two:
//!
//! - [`preview_commands`] is a pure function of `(image size, position,
//!   config)` that returns backend-agnostic [`DrawCommand`]s.
//! - [`rasterize`] executes those commands in software. A browser host may
//!   instead replay them on a 2D canvas context.
//!
//! The preview draws the scaled image, shades the four bands outside the
//! crop window (the window itself stays unobstructed) and outlines the window
//! with a border and corner markers.

mod commands;
mod raster;
mod sample;

pub use commands::{
    preview_commands, Color, DrawCommand, BORDER_WIDTH, MARKER_LENGTH, MARKER_THICKNESS,
};
pub use raster::rasterize;
pub use sample::{sample, TRANSPARENT};
