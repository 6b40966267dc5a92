use crate::core::{
    LinearScale, Series, SurfaceSize, Viewport, decimate_indices, decimation::cap_indices,
    format_time, format_value,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HoverInfo;
use crate::render::{
    CirclePrimitive, LinePrimitive, LineStrokeStyle, PolylinePrimitive, RectPrimitive,
    FrameLayer, FrameLayerKind, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::axis_ticks::grid_ticks;
use super::{ChartEngine, ChartEngineConfig, RenderStyle};

/// Extra X range drawn beyond each viewport edge so lines enter and leave cleanly.
const LINE_MARGIN_RATIO: f64 = 0.10;
const X_LABEL_EDGE_PX: f64 = 50.0;
const X_LABEL_BOTTOM_OFFSET_PX: f64 = 10.0;
const Y_LABEL_EDGE_PX: f64 = 20.0;
const Y_LABEL_RIGHT_X_PX: f64 = 45.0;
const Y_LABEL_BASELINE_OFFSET_PX: f64 = 3.0;

/// World-to-pixel mapping fixed for one frame.
#[derive(Debug, Clone, Copy)]
struct Projection {
    x_scale: LinearScale,
    y_scale: LinearScale,
    width: f64,
    height: f64,
}

impl Projection {
    fn new(viewport: &Viewport, surface: SurfaceSize) -> ChartResult<Self> {
        Ok(Self {
            x_scale: viewport.x_scale()?,
            y_scale: viewport.y_scale()?,
            width: surface.width_f64(),
            height: surface.height_f64(),
        })
    }

    fn x(&self, time: f64) -> ChartResult<f64> {
        self.x_scale.domain_to_pixel(time, self.width)
    }

    fn y(&self, value: f64) -> ChartResult<f64> {
        Ok(self.height - self.y_scale.domain_to_pixel(value, self.height)?)
    }

    fn point(&self, time: f64, value: f64) -> ChartResult<(f64, f64)> {
        Ok((self.x(time)?, self.y(value)?))
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Materializes the current scene without submitting it.
    ///
    /// Layering: background, grid and labels, zero axes, one layer per series
    /// (overlays first, main last) holding its line and markers, then the
    /// hover crosshair.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let surface = self.core.config.surface;
        if !surface.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: surface.width,
                height: surface.height,
            });
        }

        let style = &self.core.style;
        let viewport = &self.core.viewport;
        let projection = Projection::new(viewport, surface)?;

        let mut frame = RenderFrame::new(surface);
        let mut background = FrameLayer::new(FrameLayerKind::Background);
        background.rects.push(RectPrimitive::new(
            0.0,
            0.0,
            projection.width,
            projection.height,
            style.background_color,
        ));
        frame.push_layer(background);

        frame.push_layer(grid_layer(viewport, &projection, style)?);
        frame.push_layer(zero_axes_layer(&projection, style)?);
        for series in self.core.registry.list_visible() {
            frame.push_layer(series_layer(
                series,
                viewport,
                &projection,
                style,
                &self.core.config,
            )?);
        }
        if let Some(hover) = self.core.interaction.hover() {
            frame.push_layer(crosshair_layer(hover, &projection, style)?);
        }

        Ok(frame)
    }
}

fn grid_layer(
    viewport: &Viewport,
    projection: &Projection,
    style: &RenderStyle,
) -> ChartResult<FrameLayer> {
    let mut layer = FrameLayer::new(FrameLayerKind::Grid);
    let (width, height) = (projection.width, projection.height);

    let (min_x, max_x) = viewport.x_range();
    for time in grid_ticks(min_x, max_x) {
        let x = projection.x(time)?;
        layer.lines.push(LinePrimitive::new(
            x,
            0.0,
            x,
            height,
            style.grid_line_width,
            style.grid_color,
        ));
        if (X_LABEL_EDGE_PX..=width - X_LABEL_EDGE_PX).contains(&x) {
            layer.texts.push(TextPrimitive::new(
                format_time(time),
                x,
                height - X_LABEL_BOTTOM_OFFSET_PX,
                style.label_font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
        }
    }

    let (min_y, max_y) = viewport.y_range();
    for value in grid_ticks(min_y, max_y) {
        let y = projection.y(value)?;
        layer.lines.push(LinePrimitive::new(
            0.0,
            y,
            width,
            y,
            style.grid_line_width,
            style.grid_color,
        ));
        if (Y_LABEL_EDGE_PX..=height - Y_LABEL_EDGE_PX).contains(&y) {
            layer.texts.push(TextPrimitive::new(
                format_value(value),
                Y_LABEL_RIGHT_X_PX,
                y + Y_LABEL_BASELINE_OFFSET_PX,
                style.label_font_size_px,
                style.text_color,
                TextHAlign::Right,
            ));
        }
    }
    Ok(layer)
}

fn zero_axes_layer(projection: &Projection, style: &RenderStyle) -> ChartResult<FrameLayer> {
    let mut layer = FrameLayer::new(FrameLayerKind::Axis);
    let (width, height) = (projection.width, projection.height);

    let origin_x = projection.x(0.0)?;
    if (0.0..=width).contains(&origin_x) {
        layer.lines.push(LinePrimitive::new(
            origin_x,
            0.0,
            origin_x,
            height,
            style.axis_line_width,
            style.text_color,
        ));
    }

    let origin_y = projection.y(0.0)?;
    if (0.0..=height).contains(&origin_y) {
        layer.lines.push(LinePrimitive::new(
            0.0,
            origin_y,
            width,
            origin_y,
            style.axis_line_width,
            style.text_color,
        ));
    }
    Ok(layer)
}

fn series_layer(
    series: &Series,
    viewport: &Viewport,
    projection: &Projection,
    style: &RenderStyle,
    config: &ChartEngineConfig,
) -> ChartResult<FrameLayer> {
    let mut layer = FrameLayer::new(FrameLayerKind::Series(series.id()));
    let (min_x, max_x) = viewport.x_range();
    let is_main = series.id().is_main();

    let margin = viewport.x_span() * LINE_MARGIN_RATIO;
    let line_window = series.points.points_in_window(min_x - margin, max_x + margin);
    if line_window.len() >= 2 {
        let indices = decimate_indices(
            line_window,
            config.decimation_threshold,
            config.decimation_mode,
        );
        let vertices = indices
            .into_iter()
            .map(|index| {
                let point = &line_window[index];
                projection.point(point.time, point.value)
            })
            .collect::<ChartResult<Vec<_>>>()?;
        let stroke_style = if series.dashed {
            LineStrokeStyle::SERIES_DASH
        } else {
            LineStrokeStyle::Solid
        };
        layer.polylines.push(PolylinePrimitive::new(
            vertices,
            series.width_px,
            series.color,
            stroke_style,
        ));
    }

    let in_view = series.points.points_in_window(min_x, max_x);

    let overloads: Vec<_> = in_view.iter().filter(|point| point.overload).collect();
    let overload_radius = if is_main {
        style.main_overload_radius
    } else {
        style.overlay_overload_radius
    };
    for index in cap_indices(overloads.len(), config.overload_marker_cap) {
        let point = overloads[index];
        let (x, y) = projection.point(point.time, point.value)?;
        layer.circles.push(CirclePrimitive::new(
            x,
            y,
            overload_radius,
            style.overload_color,
        ));
    }

    if in_view.len() <= config.dense_point_cap {
        let point_radius = if is_main {
            style.main_point_radius
        } else {
            style.overlay_point_radius
        };
        for point in in_view {
            let (x, y) = projection.point(point.time, point.value)?;
            layer
                .circles
                .push(CirclePrimitive::new(x, y, point_radius, series.color));
        }
    }
    Ok(layer)
}

fn crosshair_layer(
    hover: HoverInfo,
    projection: &Projection,
    style: &RenderStyle,
) -> ChartResult<FrameLayer> {
    let mut layer = FrameLayer::new(FrameLayerKind::Crosshair);
    let (x, y) = projection.point(hover.time, hover.value)?;
    let (width, height) = (projection.width, projection.height);

    for (x1, y1, x2, y2) in [(x, 0.0, x, height), (0.0, y, width, y)] {
        layer.lines.push(
            LinePrimitive::new(
                x1,
                y1,
                x2,
                y2,
                style.crosshair_line_width,
                style.crosshair_color,
            )
            .with_stroke_style(LineStrokeStyle::CROSSHAIR_DASH),
        );
    }
    layer.circles.push(CirclePrimitive::new(
        x,
        y,
        style.hover_marker_radius,
        hover.color,
    ));
    Ok(layer)
}
