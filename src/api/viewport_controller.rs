use tracing::{debug, trace};

use crate::core::{Viewport, WorldPoint};
use crate::error::ChartResult;
use crate::interaction::FollowState;
use crate::render::Renderer;

use super::ChartEngine;
use super::validation::{validate_smoothing_factor, validate_window_seconds};

const ZOOM_IN_FACTOR: f64 = 0.8;
const ZOOM_OUT_FACTOR: f64 = 1.2;

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport
    }

    /// Replaces the visible rectangle; clears following.
    pub fn set_viewport_rect(&mut self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> bool {
        let changed = self.core.viewport.set_rect(min_x, max_x, min_y, max_y);
        self.after_manual_navigation(changed)
    }

    /// Translates the viewport by a world-space offset; clears following.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        let changed = self.core.viewport.pan_by(dx, dy);
        self.after_manual_navigation(changed)
    }

    /// Zooms around a world-space anchor; `factor < 1` zooms in. Clears following.
    pub fn zoom_at(&mut self, anchor: WorldPoint, factor: f64) -> bool {
        let bounds = self.core.config.zoom_scale_bounds;
        let changed = self.core.viewport.zoom_at(anchor, factor, bounds);
        self.after_manual_navigation(changed)
    }

    /// Zoom-in button action around the viewport center.
    pub fn zoom_in(&mut self) -> bool {
        let bounds = self.core.config.zoom_scale_bounds;
        let changed = self.core.viewport.zoom_centered(ZOOM_IN_FACTOR, bounds);
        self.after_manual_navigation(changed)
    }

    /// Zoom-out button action around the viewport center.
    pub fn zoom_out(&mut self) -> bool {
        let bounds = self.core.config.zoom_scale_bounds;
        let changed = self.core.viewport.zoom_centered(ZOOM_OUT_FACTOR, bounds);
        self.after_manual_navigation(changed)
    }

    /// Fits the viewport to all visible data without touching follow state.
    pub fn fit_to_data(&mut self) {
        let bounds = self.core.registry.visible_bounds();
        self.core.viewport.fit_to_data(bounds);
        debug!(has_data = bounds.is_some(), "fit viewport to data");
        self.invalidate();
    }

    #[must_use]
    pub fn follow_state(&self) -> FollowState {
        self.core.follow
    }

    #[must_use]
    pub fn is_following(&self) -> bool {
        self.core.follow.is_following
    }

    /// Enables or disables following; enabling snaps onto the moving window.
    pub fn set_following(&mut self, following: bool) {
        self.core.follow.is_following = following;
        debug!(following, "set following");
        if following {
            self.snap_to_moving_window();
        }
        self.invalidate();
    }

    /// Flips following and returns the new state.
    pub fn toggle_follow(&mut self) -> bool {
        let following = !self.core.follow.is_following;
        self.set_following(following);
        following
    }

    pub fn set_window_seconds(&mut self, window_seconds: f64) -> ChartResult<()> {
        let window_seconds = validate_window_seconds(window_seconds)?;
        self.core.follow.window_seconds = window_seconds;
        self.core.config.window_seconds = window_seconds;
        self.invalidate();
        Ok(())
    }

    pub fn set_smoothing_factor(&mut self, smoothing_factor: f64) -> ChartResult<()> {
        self.core.config.smoothing_factor = validate_smoothing_factor(smoothing_factor)?;
        Ok(())
    }

    /// Target rectangle of follow mode, or `None` without visible data.
    #[must_use]
    pub fn moving_window_target(&self) -> Option<Viewport> {
        let latest = self.core.registry.latest_visible_time()?;
        let range = Viewport::moving_window_range(latest, self.core.follow.window_seconds);
        let window_bounds = self
            .core
            .registry
            .visible_bounds_in_window(range.0, range.1);
        Some(self.core.viewport.moving_window(range, window_bounds))
    }

    /// Moves the viewport one smoothing step toward the moving window.
    ///
    /// Runs only while following, live and not dragging. Each call closes
    /// `smoothing_factor` of the remaining gap, independent of tick spacing.
    pub(super) fn advance_follow(&mut self) {
        if !self.core.follow.is_following
            || !self.core.config.live
            || self.core.interaction.is_dragging()
        {
            return;
        }
        let Some(target) = self.moving_window_target() else {
            return;
        };

        let viewport = self.core.viewport;
        if viewport.max_edge_distance(&target) <= viewport.min_span() {
            if viewport != target {
                self.core.viewport.snap_to(&target);
                self.invalidate();
            }
            return;
        }

        let factor = self.core.config.smoothing_factor;
        if self.core.viewport.smooth_toward(&target, factor) {
            trace!(factor, "follow step");
            self.invalidate();
        }
    }

    fn snap_to_moving_window(&mut self) {
        if let Some(target) = self.moving_window_target() {
            self.core.viewport.snap_to(&target);
        }
    }

    fn after_manual_navigation(&mut self, changed: bool) -> bool {
        self.core.follow.is_following = false;
        if changed {
            self.invalidate();
        }
        changed
    }
}
