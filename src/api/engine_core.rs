use std::time::Instant;

use crate::core::{SeriesRegistry, Viewport};
use crate::interaction::{FollowState, InteractionState};

use super::{ChartEngineConfig, RenderStyle, polling::PollingState};

/// Runtime orchestration state grouped separately from model/presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ChartRuntimeState {
    pub(super) dirty: bool,
    pub(super) shut_down: bool,
    pub(super) frames_rendered: u64,
    pub(super) last_tick: Option<Instant>,
}

impl ChartRuntimeState {
    #[must_use]
    pub(super) fn with_full_invalidation() -> Self {
        Self {
            dirty: true,
            shut_down: false,
            frames_rendered: 0,
            last_tick: None,
        }
    }
}

/// Internal engine core state used by the public facade (`ChartEngine`).
///
/// `config.surface` and `config.live` are the live values, updated by
/// `resize` and `set_live`.
pub(super) struct EngineCore {
    pub(super) config: ChartEngineConfig,
    pub(super) style: RenderStyle,
    pub(super) registry: SeriesRegistry,
    pub(super) viewport: Viewport,
    pub(super) interaction: InteractionState,
    pub(super) follow: FollowState,
    pub(super) polling: PollingState,
    pub(super) runtime: ChartRuntimeState,
}
