//! Point-count reduction applied per frame before projection.

use serde::{Deserialize, Serialize};

use crate::core::Point;

/// How an over-threshold window is reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecimationMode {
    /// Every `ceil(n / threshold)`-th point; cheap and visually continuous.
    #[default]
    Stride,
    /// Per-bucket minimum and maximum; keeps extrema at roughly the same budget.
    MinMax,
}

/// Selects indices to draw from a time-ordered window.
///
/// The first and last index are always present when `len > 0`, and the
/// result is strictly increasing.
#[must_use]
pub fn decimate_indices(points: &[Point], threshold: usize, mode: DecimationMode) -> Vec<usize> {
    let len = points.len();
    if len <= threshold || threshold < 2 {
        return (0..len).collect();
    }

    match mode {
        DecimationMode::Stride => stride_indices(len, threshold),
        DecimationMode::MinMax => min_max_indices(points, threshold),
    }
}

/// Stride subsampling that keeps both endpoints.
#[must_use]
pub fn stride_indices(len: usize, threshold: usize) -> Vec<usize> {
    if len <= threshold || threshold == 0 {
        return (0..len).collect();
    }

    let step = len.div_ceil(threshold);
    let mut indices: Vec<usize> = (0..len).step_by(step).collect();
    if indices.last() != Some(&(len - 1)) {
        indices.push(len - 1);
    }
    indices
}

/// Plain stride capping with no endpoint guarantee; used for markers.
#[must_use]
pub fn cap_indices(len: usize, cap: usize) -> Vec<usize> {
    if len <= cap {
        return (0..len).collect();
    }
    if cap == 0 {
        return Vec::new();
    }
    (0..len).step_by(len.div_ceil(cap)).collect()
}

fn min_max_indices(points: &[Point], threshold: usize) -> Vec<usize> {
    let len = points.len();
    let bucket_count = (threshold / 2).max(1);
    let bucket_size = len.div_ceil(bucket_count);

    let mut indices = Vec::with_capacity(threshold + 2);
    indices.push(0);
    for start in (0..len).step_by(bucket_size) {
        let end = (start + bucket_size).min(len);
        let mut min_index = start;
        let mut max_index = start;
        for index in start..end {
            if points[index].value < points[min_index].value {
                min_index = index;
            }
            if points[index].value > points[max_index].value {
                max_index = index;
            }
        }
        let (first, second) = if min_index <= max_index {
            (min_index, max_index)
        } else {
            (max_index, min_index)
        };
        for index in [first, second] {
            if indices.last() != Some(&index) {
                indices.push(index);
            }
        }
    }
    if indices.last() != Some(&(len - 1)) {
        indices.push(len - 1);
    }
    indices
}
