use tracing::debug;

use crate::core::{LegendEntry, Series, SeriesConfig, SeriesId, SeriesPatch};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    pub fn add_series(&mut self, config: SeriesConfig) -> ChartResult<SeriesId> {
        let id = self.core.registry.add_series(config)?;
        self.invalidate();
        Ok(id)
    }

    /// Removes an overlay series together with its points and polling schedule.
    pub fn remove_series(&mut self, id: SeriesId) -> ChartResult<Series> {
        let removed = self.core.registry.remove_series(id)?;
        if self.core.polling.stop(id) {
            debug!(series = %id, "polling stopped with series removal");
        }
        self.core.interaction.forget_series(id);
        self.invalidate();
        Ok(removed)
    }

    pub fn update_series(&mut self, id: SeriesId, patch: SeriesPatch) -> ChartResult<()> {
        let hides = patch.enabled == Some(false);
        self.core.registry.update_series(id, patch)?;
        if hides {
            self.core.interaction.forget_series(id);
        }
        self.invalidate();
        Ok(())
    }

    pub fn set_series_visible(&mut self, id: SeriesId, visible: bool) -> ChartResult<()> {
        self.core.registry.set_visible(id, visible)?;
        if !visible {
            self.core.interaction.forget_series(id);
        }
        self.invalidate();
        Ok(())
    }

    /// Flips visibility and returns the new state.
    pub fn toggle_series_visible(&mut self, id: SeriesId) -> ChartResult<bool> {
        let visible = self.core.registry.toggle_visible(id)?;
        if !visible {
            self.core.interaction.forget_series(id);
        }
        self.invalidate();
        Ok(visible)
    }

    pub fn series(&self, id: SeriesId) -> ChartResult<&Series> {
        self.core.registry.get(id)
    }

    /// Visible series in draw order (overlays first, main last).
    #[must_use]
    pub fn visible_series(&self) -> Vec<&Series> {
        self.core.registry.list_visible()
    }

    #[must_use]
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.core.registry.legend()
    }
}
