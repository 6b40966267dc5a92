use serde::{Deserialize, Serialize};

use crate::core::{DataBounds, LinearScale, ScreenPoint, SurfaceSize, WorldPoint};
use crate::error::{ChartError, ChartResult};

/// Smallest span either axis may shrink to.
pub const DEFAULT_MIN_SPAN: f64 = 1e-6;

const FIT_RIGHT_PADDING_RATIO: f64 = 0.05;
const VALUE_PADDING_RATIO: f64 = 0.10;
const DEFAULT_RECT: (f64, f64, f64, f64) = (0.0, 100.0, 0.0, 100.0);

/// Allowed range of the cumulative zoom magnification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self { min: 0.1, max: 10.0 }
    }
}

/// Visible world rectangle plus the zoom magnification that produced it.
///
/// Both spans are kept `>= min_span` by every mutator, so the affine maps
/// derived from it never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    scale: f64,
    min_span: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        let (min_x, max_x, min_y, max_y) = DEFAULT_RECT;
        Self::new(min_x, max_x, min_y, max_y)
    }
}

impl Viewport {
    #[must_use]
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self::with_min_span(min_x, max_x, min_y, max_y, DEFAULT_MIN_SPAN)
    }

    #[must_use]
    pub fn with_min_span(min_x: f64, max_x: f64, min_y: f64, max_y: f64, min_span: f64) -> Self {
        let min_span = if min_span.is_finite() && min_span > 0.0 {
            min_span
        } else {
            DEFAULT_MIN_SPAN
        };
        let (default_min_x, default_max_x, default_min_y, default_max_y) = DEFAULT_RECT;
        let mut viewport = Self {
            min_x: default_min_x,
            max_x: default_max_x,
            min_y: default_min_y,
            max_y: default_max_y,
            scale: 1.0,
            min_span,
        };
        viewport.set_rect(min_x, max_x, min_y, max_y);
        viewport
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn min_span(&self) -> f64 {
        self.min_span
    }

    #[must_use]
    pub fn x_span(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn y_span(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn x_range(&self) -> (f64, f64) {
        (self.min_x, self.max_x)
    }

    #[must_use]
    pub fn y_range(&self) -> (f64, f64) {
        (self.min_y, self.max_y)
    }

    /// Replaces the rectangle, ordering and widening degenerate axes.
    ///
    /// Non-finite input leaves the rectangle untouched and returns `false`.
    pub fn set_rect(&mut self, min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> bool {
        if ![min_x, max_x, min_y, max_y].iter().all(|v| v.is_finite()) {
            return false;
        }

        let (min_x, max_x) = clamp_span(min_x, max_x, self.min_span);
        let (min_y, max_y) = clamp_span(min_y, max_y, self.min_span);
        self.min_x = min_x;
        self.max_x = max_x;
        self.min_y = min_y;
        self.max_y = max_y;
        true
    }

    pub fn world_to_screen(&self, world: WorldPoint, surface: SurfaceSize) -> ChartResult<ScreenPoint> {
        let (width, height) = surface_extent(surface)?;
        let x = self.x_scale()?.domain_to_pixel(world.x, width)?;
        let y = height - self.y_scale()?.domain_to_pixel(world.y, height)?;
        Ok(ScreenPoint::new(x, y))
    }

    pub fn screen_to_world(&self, screen: ScreenPoint, surface: SurfaceSize) -> ChartResult<WorldPoint> {
        let (width, height) = surface_extent(surface)?;
        let x = self.x_scale()?.pixel_to_domain(screen.x, width)?;
        let y = self.y_scale()?.pixel_to_domain(height - screen.y, height)?;
        Ok(WorldPoint::new(x, y))
    }

    /// World-space displacement matching a screen-space displacement.
    ///
    /// Screen Y grows downward, so the returned `dy` has the opposite sign.
    pub fn screen_delta_to_world(
        &self,
        dx_px: f64,
        dy_px: f64,
        surface: SurfaceSize,
    ) -> ChartResult<(f64, f64)> {
        let (width, height) = surface_extent(surface)?;
        let dx = self.x_scale()?.pixel_delta_to_domain(dx_px, width)?;
        let dy = self.y_scale()?.pixel_delta_to_domain(dy_px, height)?;
        Ok((dx, -dy))
    }

    /// Rescales the rectangle around `anchor`; `factor < 1` zooms in.
    ///
    /// The magnification `scale / factor` is clamped into `bounds`, and the
    /// rectangle is rescaled by the factor that survives the clamp. Returns
    /// `false` when nothing changed.
    pub fn zoom_at(&mut self, anchor: WorldPoint, factor: f64, bounds: ScaleBounds) -> bool {
        if !factor.is_finite() || factor <= 0.0 || !anchor.x.is_finite() || !anchor.y.is_finite()
        {
            return false;
        }

        let target_scale = (self.scale / factor).clamp(bounds.min, bounds.max);
        let effective = self.scale / target_scale;
        if (effective - 1.0).abs() <= f64::EPSILON {
            return false;
        }

        let changed = self.set_rect(
            anchor.x - (anchor.x - self.min_x) * effective,
            anchor.x + (self.max_x - anchor.x) * effective,
            anchor.y - (anchor.y - self.min_y) * effective,
            anchor.y + (self.max_y - anchor.y) * effective,
        );
        if changed {
            self.scale = target_scale;
        }
        changed
    }

    /// Zooms around the rectangle center.
    pub fn zoom_centered(&mut self, factor: f64, bounds: ScaleBounds) -> bool {
        let center = WorldPoint::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        );
        self.zoom_at(center, factor, bounds)
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        if !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        self.set_rect(
            self.min_x + dx,
            self.max_x + dx,
            self.min_y + dy,
            self.max_y + dy,
        )
    }

    /// Fits the rectangle to `bounds` and resets the magnification.
    ///
    /// The right edge gets 5% headroom for incoming data; values get 10% on
    /// both sides. Without data the default `0..100` square is used.
    pub fn fit_to_data(&mut self, bounds: Option<DataBounds>) {
        self.scale = 1.0;
        let Some(bounds) = bounds else {
            let (min_x, max_x, min_y, max_y) = DEFAULT_RECT;
            self.set_rect(min_x, max_x, min_y, max_y);
            return;
        };

        let x_range = non_zero_span(bounds.max_x - bounds.min_x);
        let y_range = non_zero_span(bounds.max_y - bounds.min_y);
        self.set_rect(
            bounds.min_x,
            bounds.max_x + x_range * FIT_RIGHT_PADDING_RATIO,
            bounds.min_y - y_range * VALUE_PADDING_RATIO,
            bounds.max_y + y_range * VALUE_PADDING_RATIO,
        );
    }

    /// Time range of the moving window ending at `latest`.
    ///
    /// For non-negative clocks the window never starts before zero.
    #[must_use]
    pub fn moving_window_range(latest: f64, window_seconds: f64) -> (f64, f64) {
        let start = latest - window_seconds;
        if latest >= 0.0 {
            (start.max(0.0), latest)
        } else {
            (start, latest)
        }
    }

    /// Target rectangle for follow mode.
    ///
    /// `window_bounds` are the extents of the points inside `x_range` only;
    /// the current magnification is preserved.
    #[must_use]
    pub fn moving_window(&self, x_range: (f64, f64), window_bounds: Option<DataBounds>) -> Self {
        let (min_y, max_y) = match window_bounds {
            Some(bounds) => {
                let y_range = non_zero_span(bounds.max_y - bounds.min_y);
                (
                    bounds.min_y - y_range * VALUE_PADDING_RATIO,
                    bounds.max_y + y_range * VALUE_PADDING_RATIO,
                )
            }
            None => (DEFAULT_RECT.2, DEFAULT_RECT.3),
        };

        let mut target = *self;
        target.set_rect(x_range.0, x_range.1, min_y, max_y);
        target
    }

    /// Moves every edge a `factor` fraction of the way toward `target`.
    pub fn smooth_toward(&mut self, target: &Self, factor: f64) -> bool {
        let factor = if factor.is_finite() { factor.clamp(0.0, 1.0) } else { 1.0 };
        let lerp = |current: f64, goal: f64| current + (goal - current) * factor;
        self.set_rect(
            lerp(self.min_x, target.min_x),
            lerp(self.max_x, target.max_x),
            lerp(self.min_y, target.min_y),
            lerp(self.max_y, target.max_y),
        )
    }

    /// Snaps the rectangle onto `target`, keeping this viewport's magnification.
    pub fn snap_to(&mut self, target: &Self) {
        self.set_rect(target.min_x, target.max_x, target.min_y, target.max_y);
    }

    /// Edge-wise distance to `target`, used to stop smoothing once settled.
    #[must_use]
    pub fn max_edge_distance(&self, target: &Self) -> f64 {
        [
            (self.min_x - target.min_x).abs(),
            (self.max_x - target.max_x).abs(),
            (self.min_y - target.min_y).abs(),
            (self.max_y - target.max_y).abs(),
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }

    pub fn x_scale(&self) -> ChartResult<LinearScale> {
        LinearScale::new(self.min_x, self.max_x)
    }

    pub fn y_scale(&self) -> ChartResult<LinearScale> {
        LinearScale::new(self.min_y, self.max_y)
    }
}

fn surface_extent(surface: SurfaceSize) -> ChartResult<(f64, f64)> {
    if !surface.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: surface.width,
            height: surface.height,
        });
    }
    Ok((surface.width_f64(), surface.height_f64()))
}

fn non_zero_span(span: f64) -> f64 {
    if span == 0.0 { 1.0 } else { span }
}

fn clamp_span(start: f64, end: f64, min_span: f64) -> (f64, f64) {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    if end - start >= min_span {
        return (start, end);
    }
    let center = start + (end - start) * 0.5;
    let half = min_span * 0.5;
    let (mut low, mut high) = (center - half, center + half);
    // Rounding near large magnitudes can shrink or collapse the span.
    while high - low < min_span {
        let up = next_up(high);
        if up.is_finite() {
            high = up;
        } else {
            low = -next_up(-low);
        }
    }
    (low, high)
}

/// Smallest representable value above `value`.
fn next_up(value: f64) -> f64 {
    if value.is_nan() || value == f64::INFINITY {
        return value;
    }
    if value == 0.0 {
        return f64::from_bits(1);
    }
    let bits = value.to_bits();
    f64::from_bits(if value > 0.0 { bits + 1 } else { bits - 1 })
}
