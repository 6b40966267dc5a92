use serde::{Deserialize, Serialize};

/// Pixel dimensions of the drawing surface.
///
/// A zero dimension is tolerated: hosts report it transiently while a widget
/// is being laid out, and the engine skips rendering for that tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    #[must_use]
    pub fn contains(self, point: ScreenPoint) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.width_f64()
            && point.y <= self.height_f64()
    }
}

/// Pixel-space coordinate; Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// World-space coordinate: `x` is time in seconds, `y` is the series value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned extent of a set of points in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl DataBounds {
    #[must_use]
    pub fn from_point(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        }
    }

    pub fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Folds optional bounds, ignoring empty sides.
    #[must_use]
    pub fn merge(left: Option<Self>, right: Option<Self>) -> Option<Self> {
        match (left, right) {
            (Some(l), Some(r)) => Some(l.union(r)),
            (Some(b), None) | (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_the_populated_side() {
        let bounds = DataBounds::from_point(1.0, 2.0);
        assert_eq!(DataBounds::merge(None, Some(bounds)), Some(bounds));
        assert_eq!(DataBounds::merge(None, None), None);

        let merged = DataBounds::merge(Some(bounds), Some(DataBounds::from_point(-3.0, 9.0)))
            .expect("merged bounds");
        assert_eq!(merged.min_x, -3.0);
        assert_eq!(merged.max_x, 1.0);
        assert_eq!(merged.min_y, 2.0);
        assert_eq!(merged.max_y, 9.0);
    }

    #[test]
    fn zero_surface_is_invalid() {
        assert!(!SurfaceSize::new(0, 200).is_valid());
        assert!(SurfaceSize::new(1, 1).is_valid());
    }
}
