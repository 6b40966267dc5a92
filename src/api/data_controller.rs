use serde_json::Value;
use tracing::debug;

use crate::core::{MergeReport, Point, RawPoint, SeriesId};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{ChartEngine, RecordAdapter};

impl<R: Renderer> ChartEngine<R> {
    /// Merges a raw batch into one series.
    ///
    /// Malformed points are dropped and counted in the report; following, if
    /// enabled, catches up on the next live tick.
    pub fn merge_points(&mut self, id: SeriesId, raw: &[RawPoint]) -> ChartResult<MergeReport> {
        let series = self.core.registry.get_mut(id)?;
        let report = series.points.merge_report(raw, id);
        debug!(
            series = %id,
            incoming = raw.len(),
            added = report.added,
            replaced = report.replaced,
            discarded = report.discarded,
            total = series.points.len(),
            "merge points"
        );
        if report.added > 0 || report.replaced > 0 {
            self.invalidate();
        }
        Ok(report)
    }

    /// Merges into the main series.
    pub fn merge_main(&mut self, raw: &[RawPoint]) -> ChartResult<MergeReport> {
        self.merge_points(SeriesId::MAIN, raw)
    }

    /// Maps JSON rows through `adapter` and merges them into one series.
    pub fn merge_rows(
        &mut self,
        id: SeriesId,
        adapter: &RecordAdapter,
        rows: &[Value],
    ) -> ChartResult<MergeReport> {
        let raw = adapter.adapt_rows(rows);
        self.merge_points(id, &raw)
    }

    pub fn points(&self, id: SeriesId) -> ChartResult<&[Point]> {
        Ok(self.core.registry.get(id)?.points.points())
    }

    /// Drops every stored point; series and their settings are kept.
    pub fn clear_data(&mut self) {
        debug!("clear all series data");
        self.core.registry.clear_points();
        self.core.interaction.set_hover(None);
        self.invalidate();
    }
}
