use std::time::Instant;

use tracing::{debug, trace};

use crate::core::{SeriesRegistry, SurfaceSize};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::validation::validate_render_style;
use super::{ChartEngineConfig, RenderOutcome, RenderStyle, engine_core::EngineCore};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the series registry, the viewport, interaction and
/// follow state, polling bookkeeping and the renderer. It is plain
/// single-threaded data driven by the host UI loop.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> ChartEngine<R> {
    /// Current configuration, with the live surface size and live flag.
    #[must_use]
    pub fn config(&self) -> ChartEngineConfig {
        self.core.config
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.core.config.surface
    }

    #[must_use]
    pub fn registry(&self) -> &SeriesRegistry {
        &self.core.registry
    }

    #[must_use]
    pub fn render_style(&self) -> RenderStyle {
        self.core.style
    }

    pub fn set_render_style(&mut self, style: RenderStyle) -> ChartResult<()> {
        self.core.style = validate_render_style(style)?;
        self.invalidate();
        Ok(())
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.core.config.live
    }

    /// Marks whether streamed data is arriving; follow smoothing runs only while live.
    pub fn set_live(&mut self, live: bool) {
        if self.core.config.live != live {
            debug!(live, "set live");
            self.core.config.live = live;
        }
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.core.runtime.shut_down
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.core.runtime.frames_rendered
    }

    /// Applies a new surface size; the world-to-screen mapping follows on the next frame.
    ///
    /// Ignored after `shutdown`.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.core.runtime.shut_down {
            return;
        }
        let surface = SurfaceSize::new(width, height);
        if surface != self.core.config.surface {
            debug!(width, height, "resize surface");
            self.core.config.surface = surface;
            self.invalidate();
        }
    }

    /// Per-frame entry point: advances follow smoothing, then renders.
    pub fn tick(&mut self, now: Instant) -> ChartResult<RenderOutcome> {
        if self.core.runtime.shut_down {
            return Ok(RenderOutcome::Skipped);
        }

        if let Some(last) = self.core.runtime.last_tick.replace(now) {
            trace!(
                since_last_ms = now.saturating_duration_since(last).as_secs_f64() * 1000.0,
                "tick"
            );
        }
        self.advance_follow();
        self.render()
    }

    /// Builds the frame for the current state and hands it to the renderer.
    pub fn render(&mut self) -> ChartResult<RenderOutcome> {
        if self.core.runtime.shut_down || !self.core.config.surface.is_valid() {
            trace!("skip render: surface unavailable");
            return Ok(RenderOutcome::Skipped);
        }
        if !self.should_submit_frame() {
            return Ok(RenderOutcome::Unchanged);
        }

        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        self.core.runtime.dirty = false;
        self.core.runtime.frames_rendered += 1;
        trace!(
            layers = frame.layers.len(),
            vertices = frame.polyline_vertex_count(),
            circles = frame.circles().count(),
            "frame rendered"
        );
        Ok(RenderOutcome::Rendered)
    }

    /// Renders the frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<RenderOutcome>
    where
        R: CairoContextRenderer,
    {
        if self.core.runtime.shut_down || !self.core.config.surface.is_valid() {
            return Ok(RenderOutcome::Skipped);
        }
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.core.runtime.dirty = false;
        self.core.runtime.frames_rendered += 1;
        Ok(RenderOutcome::Rendered)
    }

    /// Stops all polling, cancels pointer interaction and detaches the surface.
    ///
    /// Later ticks return `Skipped`, later fetch completions are ignored.
    pub fn shutdown(&mut self) {
        if self.core.runtime.shut_down {
            return;
        }
        debug!(
            polled_series = self.core.polling.len(),
            "shutdown chart engine"
        );
        self.core.runtime.shut_down = true;
        self.core.polling.clear();
        self.core.interaction.on_pointer_leave();
        self.core.config.surface = SurfaceSize::new(0, 0);
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
