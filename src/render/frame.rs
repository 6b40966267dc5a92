use crate::core::{SeriesId, SurfaceSize};
use crate::error::{ChartError, ChartResult};
use crate::render::{CirclePrimitive, LinePrimitive, PolylinePrimitive, RectPrimitive, TextPrimitive};

/// Role of one layer in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLayerKind {
    Background,
    /// Grid lines and their axis labels.
    Grid,
    /// Zero axes.
    Axis,
    /// One visible series: its line, overload markers, then dense point markers.
    Series(SeriesId),
    /// Hover crosshair and hover marker.
    Crosshair,
}

/// Primitives of one layer.
///
/// Within a layer backends paint rects, lines, polylines, circles, texts,
/// each collection in vector order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayer {
    pub kind: FrameLayerKind,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub polylines: Vec<PolylinePrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl FrameLayer {
    #[must_use]
    pub fn new(kind: FrameLayerKind) -> Self {
        Self {
            kind,
            rects: Vec::new(),
            lines: Vec::new(),
            polylines: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.lines.is_empty()
            && self.polylines.is_empty()
            && self.circles.is_empty()
            && self.texts.is_empty()
    }

    fn validate(&self) -> ChartResult<()> {
        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Layers are painted in vector order, each one completely before the next:
/// background, grid with labels, zero axes, one layer per visible series
/// (overlays first, main last), then the hover crosshair. A later layer
/// always covers an earlier one.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub surface: SurfaceSize,
    pub layers: Vec<FrameLayer>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            surface,
            layers: Vec::new(),
        }
    }

    pub fn push_layer(&mut self, layer: FrameLayer) {
        self.layers.push(layer);
    }

    #[must_use]
    pub fn layer(&self, kind: FrameLayerKind) -> Option<&FrameLayer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    /// Series IDs in paint order.
    #[must_use]
    pub fn series_order(&self) -> Vec<SeriesId> {
        self.layers
            .iter()
            .filter_map(|layer| match layer.kind {
                FrameLayerKind::Series(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.layers.iter().flat_map(|layer| &layer.rects)
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.layers.iter().flat_map(|layer| &layer.lines)
    }

    pub fn polylines(&self) -> impl Iterator<Item = &PolylinePrimitive> {
        self.layers.iter().flat_map(|layer| &layer.polylines)
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.layers.iter().flat_map(|layer| &layer.circles)
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.layers.iter().flat_map(|layer| &layer.texts)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.surface.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.surface.width,
                height: self.surface.height,
            });
        }
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(FrameLayer::is_empty)
    }

    /// Total vertex count across series polylines.
    #[must_use]
    pub fn polyline_vertex_count(&self) -> usize {
        self.polylines().map(|p| p.points.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameLayer, FrameLayerKind, RenderFrame};
    use crate::core::{SeriesId, SurfaceSize};
    use crate::render::{CirclePrimitive, Color};

    #[test]
    fn flattened_views_follow_layer_order() {
        let mut frame = RenderFrame::new(SurfaceSize::new(100, 50));
        let mut grid = FrameLayer::new(FrameLayerKind::Grid);
        grid.circles
            .push(CirclePrimitive::new(1.0, 1.0, 1.0, Color::rgb(1.0, 0.0, 0.0)));
        let mut main = FrameLayer::new(FrameLayerKind::Series(SeriesId::MAIN));
        main.circles
            .push(CirclePrimitive::new(2.0, 2.0, 2.0, Color::rgb(0.0, 0.0, 1.0)));
        frame.push_layer(grid);
        frame.push_layer(main);

        let radii: Vec<f64> = frame.circles().map(|c| c.radius).collect();
        assert_eq!(radii, vec![1.0, 2.0]);
        assert_eq!(frame.series_order(), vec![SeriesId::MAIN]);
        assert!(frame.layer(FrameLayerKind::Crosshair).is_none());
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn zero_surface_frame_is_invalid() {
        let frame = RenderFrame::new(SurfaceSize::new(0, 10));
        assert!(frame.validate().is_err());
        assert!(frame.is_empty());
    }
}
