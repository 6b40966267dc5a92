use serde::{Deserialize, Serialize};

use crate::core::{ScreenPoint, SeriesId};
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging,
    Hovering,
}

/// Point currently highlighted under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverInfo {
    pub series_id: SeriesId,
    pub time: f64,
    pub value: f64,
    pub color: Color,
}

/// Keyboard actions a host may forward to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKey {
    ZoomIn,
    ZoomOut,
    ToggleFollow,
    Fit,
}

/// Auto-follow ("moving window") state, independent from pointer state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FollowState {
    pub is_following: bool,
    pub window_seconds: f64,
}

impl FollowState {
    /// Following starts enabled so a fresh live chart tracks incoming data.
    #[must_use]
    pub const fn new(window_seconds: f64) -> Self {
        Self {
            is_following: true,
            window_seconds,
        }
    }
}

/// Pointer state machine: `Idle`, `Dragging` and `Hovering`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    drag_anchor: Option<ScreenPoint>,
    hover: Option<HoverInfo>,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn drag_anchor(self) -> Option<ScreenPoint> {
        self.drag_anchor
    }

    #[must_use]
    pub fn hover(self) -> Option<HoverInfo> {
        self.hover
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.mode == InteractionMode::Dragging
    }

    pub fn on_drag_start(&mut self, anchor: ScreenPoint) {
        self.mode = InteractionMode::Dragging;
        self.drag_anchor = Some(anchor);
        self.hover = None;
    }

    /// Moves the drag anchor and returns the screen delta since the last anchor.
    ///
    /// Returns `None` when not dragging.
    pub fn on_drag_move(&mut self, position: ScreenPoint) -> Option<(f64, f64)> {
        if self.mode != InteractionMode::Dragging {
            return None;
        }
        let anchor = self.drag_anchor.replace(position)?;
        Some((position.x - anchor.x, position.y - anchor.y))
    }

    pub fn on_drag_end(&mut self) {
        if self.mode == InteractionMode::Dragging {
            self.mode = InteractionMode::Idle;
        }
        self.drag_anchor = None;
    }

    /// Applies a hover hit-test result; ignored while dragging.
    pub fn set_hover(&mut self, hover: Option<HoverInfo>) {
        if self.mode == InteractionMode::Dragging {
            return;
        }
        self.mode = if hover.is_some() {
            InteractionMode::Hovering
        } else {
            InteractionMode::Idle
        };
        self.hover = hover;
    }

    pub fn on_pointer_leave(&mut self) {
        self.mode = InteractionMode::Idle;
        self.drag_anchor = None;
        self.hover = None;
    }

    /// Drops hover for a series that is hidden or removed.
    pub fn forget_series(&mut self, id: SeriesId) {
        if self.hover.is_some_and(|hover| hover.series_id == id) {
            self.set_hover(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_move_reports_delta_and_moves_anchor() {
        let mut state = InteractionState::default();
        assert_eq!(state.on_drag_move(ScreenPoint::new(5.0, 5.0)), None);

        state.on_drag_start(ScreenPoint::new(10.0, 20.0));
        assert_eq!(state.on_drag_move(ScreenPoint::new(15.0, 18.0)), Some((5.0, -2.0)));
        assert_eq!(state.drag_anchor(), Some(ScreenPoint::new(15.0, 18.0)));

        state.on_drag_end();
        assert_eq!(state.mode(), InteractionMode::Idle);
        assert_eq!(state.drag_anchor(), None);
    }

    #[test]
    fn hover_is_ignored_while_dragging() {
        let mut state = InteractionState::default();
        state.on_drag_start(ScreenPoint::new(0.0, 0.0));
        state.set_hover(Some(HoverInfo {
            series_id: SeriesId::MAIN,
            time: 1.0,
            value: 2.0,
            color: Color::rgb(1.0, 1.0, 1.0),
        }));
        assert!(state.is_dragging());
        assert_eq!(state.hover(), None);
    }
}
