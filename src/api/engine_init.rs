use tracing::debug;

use crate::core::{SeriesRegistry, Viewport};
use crate::error::ChartResult;
use crate::interaction::{FollowState, InteractionState};
use crate::render::Renderer;

use super::validation::validate_engine_config;
use super::{
    ChartEngine, ChartEngineConfig, RenderStyle,
    engine_core::{ChartRuntimeState, EngineCore},
    polling::PollingState,
};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with the main series registered and a default
    /// `0..100` viewport.
    ///
    /// A zero-size surface is accepted; rendering is skipped until `resize`.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let config = validate_engine_config(config)?;
        let (min_x, max_x, min_y, max_y) = (0.0, 100.0, 0.0, 100.0);
        let viewport = Viewport::with_min_span(min_x, max_x, min_y, max_y, config.min_span);

        debug!(
            width = config.surface.width,
            height = config.surface.height,
            window_seconds = config.window_seconds,
            "create chart engine"
        );

        Ok(Self {
            renderer,
            core: EngineCore {
                config,
                style: RenderStyle::default(),
                registry: SeriesRegistry::new(),
                viewport,
                interaction: InteractionState::default(),
                follow: FollowState::new(config.window_seconds),
                polling: PollingState::default(),
                runtime: ChartRuntimeState::with_full_invalidation(),
            },
        })
    }
}
