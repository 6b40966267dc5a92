use smallvec::SmallVec;

use crate::core::nice_step;

/// Grid positions for one axis; ten-ish entries, kept inline.
pub(super) type AxisTicks = SmallVec<[f64; 16]>;

/// The visible range is split into about this many grid cells.
const GRID_DIVISIONS: f64 = 10.0;
/// Guard against pathological ranges producing runaway loops.
const MAX_GRID_TICKS: usize = 64;

/// Multiples of a 1/2/5 x 10^n step that fall inside `[min, max]`.
pub(super) fn grid_ticks(min: f64, max: f64) -> AxisTicks {
    let mut ticks = AxisTicks::new();
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return ticks;
    }

    let step = nice_step(range / GRID_DIVISIONS);
    let first = (min / step).ceil() * step;
    for index in 0..MAX_GRID_TICKS {
        let value = first + index as f64 * step;
        if value > max {
            break;
        }
        // Keep labels from printing "-0.00".
        ticks.push(if value.abs() < step * 1e-9 { 0.0 } else { value });
    }
    ticks
}
