use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DataBounds, PointStore};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

pub const MAIN_SERIES_COLOR: Color = Color::from_rgb8(0x13, 0x35, 0x92);
pub const OVERLAY_SERIES_COLOR: Color = Color::from_rgb8(0xff, 0x00, 0x00);

/// Stable identity of a series within one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(u32);

impl SeriesId {
    /// The series that always exists and draws on top.
    pub const MAIN: Self = Self(0);

    #[must_use]
    pub fn is_main(self) -> bool {
        self == Self::MAIN
    }

    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_main() {
            f.write_str("main")
        } else {
            write!(f, "series_{}", self.0)
        }
    }
}

/// Visual attributes used when a series is created.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesConfig {
    pub name: String,
    pub color: Color,
    pub width_px: f64,
    pub dashed: bool,
    pub enabled: bool,
}

impl SeriesConfig {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: OVERLAY_SERIES_COLOR,
            width_px: 1.0,
            dashed: false,
            enabled: true,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width_px: f64) -> Self {
        self.width_px = width_px;
        self
    }

    #[must_use]
    pub fn dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn validate(&self) -> ChartResult<()> {
        validate_width(self.width_px)?;
        self.color.validate()
    }
}

/// Partial update applied by `SeriesRegistry::update_series`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesPatch {
    pub name: Option<String>,
    pub color: Option<Color>,
    pub width_px: Option<f64>,
    pub dashed: Option<bool>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Series {
    id: SeriesId,
    pub name: String,
    pub color: Color,
    pub width_px: f64,
    pub dashed: bool,
    pub enabled: bool,
    pub points: PointStore,
}

impl Series {
    fn from_config(id: SeriesId, config: SeriesConfig) -> Self {
        Self {
            id,
            name: config.name,
            color: config.color,
            width_px: config.width_px,
            dashed: config.dashed,
            enabled: config.enabled,
            points: PointStore::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }
}

/// One legend row, main series first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub id: SeriesId,
    pub name: String,
    pub color: Color,
    pub dashed: bool,
    pub visible: bool,
    pub point_count: usize,
}

/// Ordered set of series for one chart.
///
/// Bounds and visibility-filtered views are always derived on demand, so add,
/// remove and visibility changes never leave stale cached extents behind.
#[derive(Debug, Clone)]
pub struct SeriesRegistry {
    series: IndexMap<SeriesId, Series>,
    next_id: u32,
}

impl Default for SeriesRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesRegistry {
    #[must_use]
    pub fn new() -> Self {
        let main = SeriesConfig::new("Main series")
            .with_color(MAIN_SERIES_COLOR)
            .with_width(2.0);
        let mut series = IndexMap::new();
        series.insert(SeriesId::MAIN, Series::from_config(SeriesId::MAIN, main));
        Self { series, next_id: 1 }
    }

    pub fn add_series(&mut self, config: SeriesConfig) -> ChartResult<SeriesId> {
        config.validate()?;
        let id = SeriesId(self.next_id);
        self.next_id += 1;
        debug!(series = %id, name = %config.name, "add series");
        self.series.insert(id, Series::from_config(id, config));
        Ok(id)
    }

    /// Detaches a series; its point store is dropped with the returned value.
    pub fn remove_series(&mut self, id: SeriesId) -> ChartResult<Series> {
        if id.is_main() {
            return Err(ChartError::MainSeriesRemoval);
        }
        let removed = self
            .series
            .shift_remove(&id)
            .ok_or(ChartError::UnknownSeries(id))?;
        debug!(series = %id, points = removed.points.len(), "remove series");
        Ok(removed)
    }

    pub fn update_series(&mut self, id: SeriesId, patch: SeriesPatch) -> ChartResult<()> {
        if let Some(width_px) = patch.width_px {
            validate_width(width_px)?;
        }
        if let Some(color) = patch.color {
            color.validate()?;
        }

        let series = self.get_mut(id)?;
        if let Some(name) = patch.name {
            series.name = name;
        }
        if let Some(color) = patch.color {
            series.color = color;
        }
        if let Some(width_px) = patch.width_px {
            series.width_px = width_px;
        }
        if let Some(dashed) = patch.dashed {
            series.dashed = dashed;
        }
        if let Some(enabled) = patch.enabled {
            series.enabled = enabled;
        }
        Ok(())
    }

    pub fn set_visible(&mut self, id: SeriesId, visible: bool) -> ChartResult<()> {
        self.get_mut(id)?.enabled = visible;
        Ok(())
    }

    /// Flips visibility and returns the new state.
    pub fn toggle_visible(&mut self, id: SeriesId) -> ChartResult<bool> {
        let series = self.get_mut(id)?;
        series.enabled = !series.enabled;
        Ok(series.enabled)
    }

    /// Enabled series in draw order: overlays by insertion, main last.
    #[must_use]
    pub fn list_visible(&self) -> Vec<&Series> {
        let mut visible: Vec<&Series> = self
            .series
            .values()
            .filter(|s| s.enabled && !s.id.is_main())
            .collect();
        if let Some(main) = self.series.get(&SeriesId::MAIN).filter(|s| s.enabled) {
            visible.push(main);
        }
        visible
    }

    /// Enabled series in hit-test priority order: main first, then overlays.
    pub(crate) fn visible_by_priority(&self) -> impl Iterator<Item = &Series> {
        self.series.values().filter(|s| s.enabled)
    }

    pub fn get(&self, id: SeriesId) -> ChartResult<&Series> {
        self.series.get(&id).ok_or(ChartError::UnknownSeries(id))
    }

    pub fn get_mut(&mut self, id: SeriesId) -> ChartResult<&mut Series> {
        self.series.get_mut(&id).ok_or(ChartError::UnknownSeries(id))
    }

    #[must_use]
    pub fn contains(&self, id: SeriesId) -> bool {
        self.series.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.values()
    }

    pub fn clear_points(&mut self) {
        for series in self.series.values_mut() {
            series.points.clear();
        }
    }

    /// Union of the data extents of all enabled series.
    #[must_use]
    pub fn visible_bounds(&self) -> Option<DataBounds> {
        self.visible_by_priority()
            .fold(None, |acc, s| DataBounds::merge(acc, s.points.bounds()))
    }

    /// Newest timestamp across enabled series.
    #[must_use]
    pub fn latest_visible_time(&self) -> Option<f64> {
        self.visible_by_priority()
            .filter_map(|s| s.points.latest_time())
            .reduce(f64::max)
    }

    /// Extents of enabled points whose time lies in `[start, end]`.
    #[must_use]
    pub fn visible_bounds_in_window(&self, start: f64, end: f64) -> Option<DataBounds> {
        self.visible_by_priority().fold(None, |acc, s| {
            DataBounds::merge(acc, s.points.bounds_in_window(start, end))
        })
    }

    #[must_use]
    pub fn has_visible_data(&self) -> bool {
        self.visible_by_priority().any(|s| !s.points.is_empty())
    }

    #[must_use]
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.series
            .values()
            .map(|s| LegendEntry {
                id: s.id,
                name: s.name.clone(),
                color: s.color,
                dashed: s.dashed,
                visible: s.enabled,
                point_count: s.points.len(),
            })
            .collect()
    }
}

fn validate_width(width_px: f64) -> ChartResult<()> {
    if !width_px.is_finite() || width_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "series width must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
