use std::collections::HashSet;
use std::ops::Range;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::trace;

use crate::core::primitives::quantize_time;
use crate::core::raw_point::{RawPoint, RawTime};
use crate::core::time_codec::{parse_time, parse_value};
use crate::core::{DataBounds, SeriesId};

/// One validated observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub time: f64,
    pub value: f64,
    pub series_id: SeriesId,
    pub overload: bool,
    pub original_time: RawTime,
    pub received_at: DateTime<Utc>,
}

impl Point {
    #[must_use]
    pub fn key(&self) -> i64 {
        quantize_time(self.time)
    }
}

/// Per-merge accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MergeReport {
    /// Points stored under a key that was not present before.
    pub added: usize,
    /// Points that overwrote an existing key (in the store or earlier in the batch).
    pub replaced: usize,
    /// Raw points rejected by validation.
    pub discarded: usize,
}

/// Time-ordered, deduplicated points of one series.
///
/// Invariants: `points` is sorted by `time` ascending and holds at most one
/// point per millisecond key. Retention is unbounded.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    points: Vec<Point>,
    seen_keys: HashSet<i64>,
}

impl PointStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a batch and returns how many points were newly added.
    pub fn merge(&mut self, raw: &[RawPoint], series_id: SeriesId) -> usize {
        self.merge_report(raw, series_id).added
    }

    pub fn merge_report(&mut self, raw: &[RawPoint], series_id: SeriesId) -> MergeReport {
        self.merge_at(raw, series_id, Utc::now())
    }

    /// Merges a batch stamping every point with `received_at`.
    pub fn merge_at(
        &mut self,
        raw: &[RawPoint],
        series_id: SeriesId,
        received_at: DateTime<Utc>,
    ) -> MergeReport {
        let mut report = MergeReport::default();
        let mut batch: IndexMap<i64, Point> = IndexMap::with_capacity(raw.len());

        for (ordinal, item) in raw.iter().enumerate() {
            let (Some(raw_time), Some(raw_value)) = (&item.time, &item.value) else {
                report.discarded += 1;
                continue;
            };
            let Some(value) = parse_value(raw_value) else {
                report.discarded += 1;
                continue;
            };

            let time = parse_time(raw_time, ordinal);
            let point = Point {
                time,
                value,
                series_id,
                overload: item.overload,
                original_time: raw_time.clone(),
                received_at,
            };
            if batch.insert(quantize_time(time), point).is_some() {
                report.replaced += 1;
            }
        }

        let (replacements, additions): (Vec<_>, Vec<_>) = batch
            .into_iter()
            .partition(|(key, _)| self.seen_keys.contains(key));

        for (key, point) in replacements {
            let index = self.points.partition_point(|p| p.key() < key);
            if let Some(slot) = self.points.get_mut(index).filter(|p| p.key() == key) {
                *slot = point;
                report.replaced += 1;
            }
        }

        let mut needs_sort = false;
        let mut latest = self.latest_time();
        for (key, point) in additions {
            if latest.is_some_and(|t| point.time < t) {
                needs_sort = true;
            }
            latest = Some(latest.map_or(point.time, |t| t.max(point.time)));
            self.seen_keys.insert(key);
            self.points.push(point);
            report.added += 1;
        }

        if needs_sort {
            self.points.sort_by(|a, b| a.time.total_cmp(&b.time));
        }

        trace!(
            series = %series_id,
            added = report.added,
            replaced = report.replaced,
            discarded = report.discarded,
            "merged batch"
        );
        report
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.seen_keys.clear();
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: i64) -> bool {
        self.seen_keys.contains(&key)
    }

    #[must_use]
    pub fn latest_time(&self) -> Option<f64> {
        self.points.last().map(|p| p.time)
    }

    #[must_use]
    pub fn bounds(&self) -> Option<DataBounds> {
        bounds_of(&self.points)
    }

    /// Index range of points with `start <= time <= end`.
    #[must_use]
    pub fn range_indices(&self, start: f64, end: f64) -> Range<usize> {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let lo = self.points.partition_point(|p| p.time < start);
        let hi = self.points.partition_point(|p| p.time <= end);
        lo..hi.max(lo)
    }

    #[must_use]
    pub fn points_in_window(&self, start: f64, end: f64) -> &[Point] {
        &self.points[self.range_indices(start, end)]
    }

    #[must_use]
    pub fn bounds_in_window(&self, start: f64, end: f64) -> Option<DataBounds> {
        bounds_of(self.points_in_window(start, end))
    }

    /// Point in `[start, end]` closest in time to `target`.
    ///
    /// Ties resolve to the earlier point.
    #[must_use]
    pub fn nearest_in_window(&self, target: f64, start: f64, end: f64) -> Option<&Point> {
        let window = self.points_in_window(start, end);
        let split = window.partition_point(|p| p.time < target);
        let before = split.checked_sub(1).and_then(|i| window.get(i));
        let after = window.get(split);

        match (before, after) {
            (Some(b), Some(a)) => {
                if (target - b.time).abs() <= (a.time - target).abs() {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (Some(p), None) | (None, Some(p)) => Some(p),
            (None, None) => None,
        }
    }
}

fn bounds_of(points: &[Point]) -> Option<DataBounds> {
    let (first, rest) = points.split_first()?;
    let mut bounds = DataBounds::from_point(first.time, first.value);
    for point in rest {
        bounds.include(point.time, point.value);
    }
    Some(bounds)
}
