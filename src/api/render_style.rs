use serde::{Deserialize, Serialize};

use crate::render::Color;

/// Style contract for the current render frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub background_color: Color,
    pub grid_color: Color,
    pub grid_line_width: f64,
    /// Axis labels and zero axes.
    pub text_color: Color,
    pub axis_line_width: f64,
    pub label_font_size_px: f64,
    pub crosshair_color: Color,
    pub crosshair_line_width: f64,
    pub hover_marker_radius: f64,
    pub overload_color: Color,
    pub main_overload_radius: f64,
    pub overlay_overload_radius: f64,
    pub main_point_radius: f64,
    pub overlay_point_radius: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::from_rgb8(0x2a, 0x2a, 0x2a),
            grid_color: Color::from_rgb8(0x44, 0x44, 0x44),
            grid_line_width: 0.5,
            text_color: Color::rgb(1.0, 1.0, 1.0),
            axis_line_width: 1.0,
            label_font_size_px: 10.0,
            crosshair_color: Color::rgba(1.0, 1.0, 1.0, 0.3),
            crosshair_line_width: 1.0,
            hover_marker_radius: 4.0,
            overload_color: Color::from_rgb8(0xff, 0x00, 0x00),
            main_overload_radius: 3.0,
            overlay_overload_radius: 2.0,
            main_point_radius: 2.0,
            overlay_point_radius: 1.0,
        }
    }
}
