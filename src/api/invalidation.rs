use serde::{Deserialize, Serialize};

use crate::render::Renderer;

use super::ChartEngine;

/// When `tick`/`render` actually submit a frame.
///
/// Both policies produce identical frames; `WhenDirty` only avoids
/// resubmitting one when nothing changed since the last submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RedrawPolicy {
    #[default]
    Always,
    WhenDirty,
}

/// Result of one render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A frame was built and handed to the renderer.
    Rendered,
    /// Nothing changed and the policy is `WhenDirty`.
    Unchanged,
    /// Zero-size or detached surface, or the engine is shut down.
    Skipped,
}

impl<R: Renderer> ChartEngine<R> {
    /// Marks the scene as changed so the next `WhenDirty` tick redraws.
    pub fn invalidate(&mut self) {
        self.core.runtime.dirty = true;
    }

    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.core.runtime.dirty
    }

    #[must_use]
    pub fn redraw_policy(&self) -> RedrawPolicy {
        self.core.config.redraw_policy
    }

    pub fn set_redraw_policy(&mut self, policy: RedrawPolicy) {
        self.core.config.redraw_policy = policy;
        self.invalidate();
    }

    pub(super) fn should_submit_frame(&self) -> bool {
        match self.core.config.redraw_policy {
            RedrawPolicy::Always => true,
            RedrawPolicy::WhenDirty => self.core.runtime.dirty,
        }
    }
}
