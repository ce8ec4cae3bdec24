//! Interactive editing session: image ownership, drag state and zoom steps.
//!
//! The session is the only stateful piece of the engine. It owns the loaded
//! [`SourceImage`] and the current [`ImagePosition`], and turns pointer and
//! zoom events into position updates. Rendering and extraction are delegated
//! to the pure functions in [`render`](crate::render) and
//! [`extract`](crate::extract).
//!
//! # Drag State Machine
//!
//! ```text
//! Idle --pointer_down (inside canvas)--> Dragging
//! Dragging --pointer_move (anywhere)--> Dragging (pan updated, clamped)
//! Dragging --pointer_up--> Idle
//! ```
//!
//! Moves are honoured wherever the pointer is while a drag is active, so a
//! host should forward viewport-wide move events for the duration of a drag.

use image::RgbaImage;

use crate::config::{ConfigError, EditorConfig};
use crate::decode::SourceImage;
use crate::extract::{extract_crop, CropOutput, ExtractError};
use crate::geometry::{
    checked_source, clamp_pan, compute_initial_fit, offset_from_position, position_from_offset,
    GeometryError, PanOffset,
};
use crate::position::ImagePosition;
use crate::render::{preview_commands, rasterize, DrawCommand};
use crate::style::{project_style, RenderMode, StyleDescriptor};

/// Pointer drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Canvas coordinates where the drag started.
        pointer_start: (f64, f64),
        /// Pan offset at the start of the drag.
        offset_start: PanOffset,
    },
}

/// One editing session over at most one image.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: EditorConfig,
    image: Option<SourceImage>,
    position: ImagePosition,
    /// Result of the initial fit, restored by [`EditorSession::reset_zoom`].
    fit: ImagePosition,
    drag: DragState,
}

impl EditorSession {
    /// Create an empty session.
    ///
    /// # Errors
    ///
    /// Returns the first problem [`EditorConfig::validate`] finds.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            image: None,
            position: ImagePosition::default(),
            fit: ImagePosition::default(),
            drag: DragState::Idle,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn position(&self) -> ImagePosition {
        self.position
    }

    /// The position computed when the current image was loaded.
    pub fn fit_position(&self) -> ImagePosition {
        self.fit
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    // ========================================================================
    // Image lifecycle
    // ========================================================================

    /// Replace the session image and apply the initial fit.
    ///
    /// Any drag in progress is abandoned. An image that is not fully decoded
    /// is rejected and the current image is kept.
    pub fn load(&mut self, image: SourceImage) -> Result<(), GeometryError> {
        checked_source(&image)?;
        let fit = compute_initial_fit(
            image.width,
            image.height,
            self.config.canvas_size,
            &self.config.zoom_range,
        )?;

        log::debug!(
            "loaded {}x{} image, initial scale {:.4}",
            image.width,
            image.height,
            fit.scale()
        );

        self.image = Some(image);
        self.fit = fit;
        self.position = fit;
        self.drag = DragState::Idle;
        Ok(())
    }

    /// Drop the image and return to the initial state.
    pub fn clear(&mut self) {
        self.image = None;
        self.position = ImagePosition::default();
        self.fit = ImagePosition::default();
        self.drag = DragState::Idle;
    }

    // ========================================================================
    // Pointer interaction
    // ========================================================================

    /// Start a drag if `(px, py)` lies on the canvas and an image is loaded.
    ///
    /// Returns `true` when a drag started.
    pub fn pointer_down(&mut self, px: f64, py: f64) -> bool {
        let Some(image) = &self.image else {
            return false;
        };
        let canvas = self.config.canvas_size;
        if !(px >= 0.0 && px < canvas && py >= 0.0 && py < canvas) {
            return false;
        }

        let offset_start = match offset_from_position(&self.position, image.width, image.height) {
            Ok(offset) => offset,
            Err(e) => {
                log::warn!("cannot start drag: {}", e);
                return false;
            }
        };

        self.drag = DragState::Dragging {
            pointer_start: (px, py),
            offset_start,
        };
        log::debug!("drag started at ({:.1}, {:.1})", px, py);
        true
    }

    /// Update the pan for a pointer move. Ignored unless dragging.
    ///
    /// Returns `true` when the move was applied.
    pub fn pointer_move(&mut self, px: f64, py: f64) -> Result<bool, GeometryError> {
        let DragState::Dragging {
            pointer_start,
            offset_start,
        } = self.drag
        else {
            return Ok(false);
        };
        let Some(image) = &self.image else {
            return Ok(false);
        };

        let proposed = PanOffset::new(
            offset_start.x + (px - pointer_start.0),
            offset_start.y + (py - pointer_start.1),
        );
        let scale = self.position.scale();
        let offset = clamp_pan(
            proposed,
            image.width,
            image.height,
            scale,
            self.config.canvas_size,
        )?;
        self.position = position_from_offset(offset, image.width, image.height, self.position.zoom)?;
        Ok(true)
    }

    /// End the drag, if any.
    pub fn pointer_up(&mut self) {
        if self.is_dragging() {
            log::debug!("drag ended at x={:.2}% y={:.2}%", self.position.x, self.position.y);
        }
        self.drag = DragState::Idle;
    }

    // ========================================================================
    // Zoom
    // ========================================================================

    /// Multiply the scale by the zoom step, up to the configured maximum.
    pub fn zoom_in(&mut self) -> Result<ImagePosition, GeometryError> {
        let scale = self.position.scale() * self.config.zoom_step;
        self.apply_scale(scale)
    }

    /// Divide the scale by the zoom step, down to the configured minimum.
    pub fn zoom_out(&mut self) -> Result<ImagePosition, GeometryError> {
        let scale = self.position.scale() / self.config.zoom_step;
        self.apply_scale(scale)
    }

    /// Restore the initial fit for the loaded image.
    pub fn reset_zoom(&mut self) -> Result<ImagePosition, GeometryError> {
        self.position = match &self.image {
            Some(image) => compute_initial_fit(
                image.width,
                image.height,
                self.config.canvas_size,
                &self.config.zoom_range,
            )?,
            None => ImagePosition::default(),
        };
        self.fit = self.position;
        Ok(self.position)
    }

    /// Set the zoom in percent (100 = source pixel size), clamped.
    pub fn set_zoom(&mut self, percent: f64) -> Result<ImagePosition, GeometryError> {
        self.apply_scale(percent / 100.0)
    }

    /// Replace the position, clamping anchors, zoom and pan.
    pub fn set_position(&mut self, position: ImagePosition) -> Result<ImagePosition, GeometryError> {
        self.position = position.clamped(&self.config.zoom_range);
        self.reclamp_pan()?;
        Ok(self.position)
    }

    /// Zoom about the crop centre: the anchors stay, the scale changes.
    fn apply_scale(&mut self, scale: f64) -> Result<ImagePosition, GeometryError> {
        let scale = self.config.zoom_range.clamp_scale(scale);
        self.position = self.position.with_scale(scale);
        self.reclamp_pan()?;
        log::debug!("zoom set to {:.1}%", self.position.zoom);
        Ok(self.position)
    }

    /// Re-apply the pan bounds for the current scale.
    fn reclamp_pan(&mut self) -> Result<(), GeometryError> {
        let Some(image) = &self.image else {
            return Ok(());
        };
        let offset = offset_from_position(&self.position, image.width, image.height)?;
        let offset = clamp_pan(
            offset,
            image.width,
            image.height,
            self.position.scale(),
            self.config.canvas_size,
        )?;
        self.position = position_from_offset(offset, image.width, image.height, self.position.zoom)?;
        Ok(())
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Draw commands for the current state.
    pub fn render_commands(&self) -> Result<Vec<DrawCommand>, GeometryError> {
        let size = self.image.as_ref().map(|image| (image.width, image.height));
        preview_commands(size, &self.position, &self.config)
    }

    /// Software-rendered preview of the whole canvas.
    pub fn render_preview(&self) -> Result<RgbaImage, GeometryError> {
        let commands = self.render_commands()?;
        Ok(rasterize(
            &commands,
            self.image.as_ref(),
            self.config.canvas_pixels(),
            self.config.filter,
        ))
    }

    /// Extract the crop at the configured output size.
    pub fn extract(&self) -> Result<CropOutput, ExtractError> {
        extract_crop(self.image.as_ref(), &self.position, &self.config)
    }

    /// CSS projection of the current position, clamped with the session's
    /// zoom range.
    pub fn project_style(&self, mode: RenderMode) -> StyleDescriptor {
        project_style(Some(&self.position), mode, &self.config.zoom_range)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Zoom-in strictly increases the scale until the cap,
        /// zoom-out strictly decreases it until the floor.
        #[test]
        fn prop_zoom_monotonic(start in 10.0f64..=500.0, steps in 1usize..=30) {
            let mut session = EditorSession::new(EditorConfig::avatar()).unwrap();
            session.load(SourceImage::filled(64, 48, [0, 0, 0, 255])).unwrap();
            session.set_zoom(start).unwrap();

            for _ in 0..steps {
                let before = session.position().scale();
                let after = session.zoom_in().unwrap().scale();
                prop_assert!(after > before || after == 5.0);
                prop_assert!(after <= 5.0);
            }
            for _ in 0..steps {
                let before = session.position().scale();
                let after = session.zoom_out().unwrap().scale();
                prop_assert!(after < before || after == 0.1);
                prop_assert!(after >= 0.1);
            }
        }

        /// Property: Any drag leaves the anchors inside 0..=100.
        #[test]
        fn prop_drag_keeps_anchor_in_range(
            dx in -2000.0f64..2000.0,
            dy in -2000.0f64..2000.0,
            zoom in 10.0f64..=500.0,
        ) {
            let mut session = EditorSession::new(EditorConfig::avatar()).unwrap();
            session.load(SourceImage::filled(300, 200, [0, 0, 0, 255])).unwrap();
            session.set_zoom(zoom).unwrap();

            prop_assert!(session.pointer_down(150.0, 150.0));
            session.pointer_move(150.0 + dx, 150.0 + dy).unwrap();
            session.pointer_up();

            let pos = session.position();
            prop_assert!((0.0..=100.0).contains(&pos.x));
            prop_assert!((0.0..=100.0).contains(&pos.y));
        }
    }
}
