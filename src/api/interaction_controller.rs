use tracing::{debug, trace};

use crate::core::ScreenPoint;
use crate::interaction::{ChartKey, HoverInfo, InteractionMode, InteractionState};
use crate::render::Renderer;

use super::ChartEngine;

const WHEEL_ZOOM_IN_FACTOR: f64 = 1.0 / 1.1;
const WHEEL_ZOOM_OUT_FACTOR: f64 = 1.0 / 0.9;

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.core.interaction.mode()
    }

    #[must_use]
    pub fn interaction_state(&self) -> InteractionState {
        self.core.interaction
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.core.interaction.is_dragging()
    }

    #[must_use]
    pub fn hover(&self) -> Option<HoverInfo> {
        self.core.interaction.hover()
    }

    /// Starts a drag when the pointer is inside the surface.
    ///
    /// Clears hover and following. Returns whether a drag started.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        let position = ScreenPoint::new(x, y);
        if !self.core.config.surface.contains(position) {
            return false;
        }
        self.core.interaction.on_drag_start(position);
        self.core.follow.is_following = false;
        debug!(x, y, "drag start");
        self.invalidate();
        true
    }

    /// Pans while dragging; otherwise hit-tests for hover.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let position = ScreenPoint::new(x, y);
        if self.core.interaction.is_dragging() {
            self.drag_to(position);
            return;
        }

        let hover = self.hover_at(position);
        if hover != self.core.interaction.hover() {
            self.invalidate();
        }
        self.core.interaction.set_hover(hover);
    }

    pub fn pointer_up(&mut self) {
        if self.core.interaction.is_dragging() {
            debug!("drag end");
        }
        self.core.interaction.on_drag_end();
    }

    /// Cancels any drag and clears hover.
    pub fn pointer_leave(&mut self) {
        if self.core.interaction.hover().is_some() {
            self.invalidate();
        }
        self.core.interaction.on_pointer_leave();
    }

    /// Zooms around the cursor: positive `delta_y` zooms in, negative zooms out.
    ///
    /// Always clears following. Returns whether the viewport changed.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) -> bool {
        self.core.follow.is_following = false;
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_IN_FACTOR
        } else if delta_y < 0.0 {
            WHEEL_ZOOM_OUT_FACTOR
        } else {
            return false;
        };

        let Ok(anchor) = self
            .core
            .viewport
            .screen_to_world(ScreenPoint::new(x, y), self.core.config.surface)
        else {
            return false;
        };
        trace!(x, y, factor, "wheel zoom");
        self.zoom_at(anchor, factor)
    }

    /// Fits all visible data and enables following.
    pub fn double_click(&mut self) {
        self.fit_to_data();
        self.core.follow.is_following = true;
        debug!("double click: fit and follow");
    }

    pub fn keyboard(&mut self, key: ChartKey) {
        match key {
            ChartKey::ZoomIn => {
                self.zoom_in();
            }
            ChartKey::ZoomOut => {
                self.zoom_out();
            }
            ChartKey::ToggleFollow => {
                self.toggle_follow();
            }
            ChartKey::Fit => self.double_click(),
        }
    }

    fn drag_to(&mut self, position: ScreenPoint) {
        let Some((dx_px, dy_px)) = self.core.interaction.on_drag_move(position) else {
            return;
        };
        let Ok((dx, dy)) =
            self.core
                .viewport
                .screen_delta_to_world(dx_px, dy_px, self.core.config.surface)
        else {
            return;
        };
        // Content follows the pointer: the camera moves opposite to the drag.
        self.pan_by(-dx, -dy);
    }

    /// Nearest visible in-view point by time, within the hover tolerance.
    ///
    /// Series are scanned main first, so an exact tie keeps the main series.
    pub(super) fn hover_at(&self, position: ScreenPoint) -> Option<HoverInfo> {
        let viewport = &self.core.viewport;
        let world = viewport
            .screen_to_world(position, self.core.config.surface)
            .ok()?;
        let (min_x, max_x) = viewport.x_range();
        let tolerance = viewport.x_span() * self.core.config.hover_tolerance_fraction;

        let mut best: Option<(f64, HoverInfo)> = None;
        for series in self.core.registry.visible_by_priority() {
            let Some(point) = series.points.nearest_in_window(world.x, min_x, max_x) else {
                continue;
            };
            let distance = (point.time - world.x).abs();
            if best.is_none_or(|(best_distance, _)| distance < best_distance) {
                best = Some((
                    distance,
                    HoverInfo {
                        series_id: series.id(),
                        time: point.time,
                        value: point.value,
                        color: series.color,
                    },
                ));
            }
        }

        best.filter(|(distance, _)| *distance < tolerance)
            .map(|(_, hover)| hover)
    }
}
