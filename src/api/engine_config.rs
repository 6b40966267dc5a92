use serde::{Deserialize, Serialize};

use crate::core::{DecimationMode, ScaleBounds, SurfaceSize};
use crate::error::{ChartError, ChartResult};

use super::RedrawPolicy;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format. Every field except `surface`
/// falls back to its default when missing from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub surface: SurfaceSize,
    /// Width of the follow-mode moving window, in seconds.
    #[serde(default = "default_window_seconds")]
    pub window_seconds: f64,
    /// Series windows above this many points are decimated.
    #[serde(default = "default_decimation_threshold")]
    pub decimation_threshold: usize,
    #[serde(default = "default_overload_marker_cap")]
    pub overload_marker_cap: usize,
    /// Every in-view point gets a marker when the count is at most this.
    #[serde(default = "default_dense_point_cap")]
    pub dense_point_cap: usize,
    /// Fraction of the remaining distance follow mode covers per frame.
    #[serde(default = "default_smoothing_factor")]
    pub smoothing_factor: f64,
    /// Hover hit radius as a fraction of the visible X span.
    #[serde(default = "default_hover_tolerance_fraction")]
    pub hover_tolerance_fraction: f64,
    #[serde(default)]
    pub zoom_scale_bounds: ScaleBounds,
    #[serde(default = "default_min_span")]
    pub min_span: f64,
    #[serde(default)]
    pub decimation_mode: DecimationMode,
    #[serde(default)]
    pub redraw_policy: RedrawPolicy,
    /// Whether streamed data is arriving; follow smoothing only runs while live.
    #[serde(default)]
    pub live: bool,
}

impl ChartEngineConfig {
    /// Creates a config with default tuning for the given surface.
    #[must_use]
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            surface,
            window_seconds: default_window_seconds(),
            decimation_threshold: default_decimation_threshold(),
            overload_marker_cap: default_overload_marker_cap(),
            dense_point_cap: default_dense_point_cap(),
            smoothing_factor: default_smoothing_factor(),
            hover_tolerance_fraction: default_hover_tolerance_fraction(),
            zoom_scale_bounds: ScaleBounds::default(),
            min_span: default_min_span(),
            decimation_mode: DecimationMode::default(),
            redraw_policy: RedrawPolicy::default(),
            live: false,
        }
    }

    #[must_use]
    pub fn with_window_seconds(mut self, window_seconds: f64) -> Self {
        self.window_seconds = window_seconds;
        self
    }

    #[must_use]
    pub fn with_decimation(mut self, threshold: usize, mode: DecimationMode) -> Self {
        self.decimation_threshold = threshold;
        self.decimation_mode = mode;
        self
    }

    #[must_use]
    pub fn with_smoothing_factor(mut self, smoothing_factor: f64) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    #[must_use]
    pub fn with_redraw_policy(mut self, redraw_policy: RedrawPolicy) -> Self {
        self.redraw_policy = redraw_policy;
        self
    }

    #[must_use]
    pub fn with_live(mut self, live: bool) -> Self {
        self.live = live;
        self
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        super::validation::validate_engine_config(config)
    }
}

fn default_window_seconds() -> f64 {
    30.0
}

fn default_decimation_threshold() -> usize {
    5_000
}

fn default_overload_marker_cap() -> usize {
    100
}

fn default_dense_point_cap() -> usize {
    200
}

fn default_smoothing_factor() -> f64 {
    0.3
}

fn default_hover_tolerance_fraction() -> f64 {
    0.02
}

fn default_min_span() -> f64 {
    crate::core::viewport::DEFAULT_MIN_SPAN
}
