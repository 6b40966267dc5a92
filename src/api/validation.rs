use crate::error::{ChartError, ChartResult};

use super::{ChartEngineConfig, RenderStyle};

pub(super) fn validate_engine_config(config: ChartEngineConfig) -> ChartResult<ChartEngineConfig> {
    validate_window_seconds(config.window_seconds)?;
    validate_smoothing_factor(config.smoothing_factor)?;

    if config.decimation_threshold < 2 {
        return Err(ChartError::InvalidConfig(
            "decimation_threshold must be >= 2".to_owned(),
        ));
    }
    if !config.hover_tolerance_fraction.is_finite()
        || !(0.0..=1.0).contains(&config.hover_tolerance_fraction)
    {
        return Err(ChartError::InvalidConfig(
            "hover_tolerance_fraction must be finite and in [0, 1]".to_owned(),
        ));
    }
    if !config.min_span.is_finite() || config.min_span <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "min_span must be finite and > 0".to_owned(),
        ));
    }

    let bounds = config.zoom_scale_bounds;
    if !bounds.min.is_finite() || !bounds.max.is_finite() || bounds.min <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "zoom scale bounds must be finite and > 0".to_owned(),
        ));
    }
    // Fit resets the magnification to 1, so 1 must be reachable.
    if bounds.min > 1.0 || bounds.max < 1.0 {
        return Err(ChartError::InvalidConfig(
            "zoom scale bounds must satisfy min <= 1 <= max".to_owned(),
        ));
    }

    Ok(config)
}

pub(super) fn validate_window_seconds(window_seconds: f64) -> ChartResult<f64> {
    if !window_seconds.is_finite() || window_seconds <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "window_seconds must be finite and > 0".to_owned(),
        ));
    }
    Ok(window_seconds)
}

pub(super) fn validate_smoothing_factor(smoothing_factor: f64) -> ChartResult<f64> {
    if !smoothing_factor.is_finite() || smoothing_factor <= 0.0 || smoothing_factor > 1.0 {
        return Err(ChartError::InvalidConfig(
            "smoothing_factor must be finite and in (0, 1]".to_owned(),
        ));
    }
    Ok(smoothing_factor)
}

pub(super) fn validate_render_style(style: RenderStyle) -> ChartResult<RenderStyle> {
    for color in [
        style.background_color,
        style.grid_color,
        style.text_color,
        style.crosshair_color,
        style.overload_color,
    ] {
        color.validate()?;
    }

    for (name, value) in [
        ("grid_line_width", style.grid_line_width),
        ("axis_line_width", style.axis_line_width),
        ("label_font_size_px", style.label_font_size_px),
        ("crosshair_line_width", style.crosshair_line_width),
        ("hover_marker_radius", style.hover_marker_radius),
        ("main_overload_radius", style.main_overload_radius),
        ("overlay_overload_radius", style.overlay_overload_radius),
        ("main_point_radius", style.main_point_radius),
        ("overlay_point_radius", style.overlay_point_radius),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "render style `{name}` must be finite and > 0"
            )));
        }
    }

    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ScaleBounds, SurfaceSize};

    #[test]
    fn default_config_is_valid() {
        let config = ChartEngineConfig::new(SurfaceSize::new(800, 400));
        assert!(validate_engine_config(config).is_ok());
    }

    #[test]
    fn rejects_out_of_range_tuning() {
        let base = ChartEngineConfig::new(SurfaceSize::new(800, 400));

        let mut config = base;
        config.smoothing_factor = 0.0;
        assert!(matches!(
            validate_engine_config(config),
            Err(ChartError::InvalidConfig(_))
        ));

        let mut config = base;
        config.window_seconds = f64::NAN;
        assert!(validate_engine_config(config).is_err());

        let mut config = base;
        config.zoom_scale_bounds = ScaleBounds { min: 2.0, max: 10.0 };
        assert!(validate_engine_config(config).is_err());

        let mut config = base;
        config.decimation_threshold = 1;
        assert!(validate_engine_config(config).is_err());
    }

    #[test]
    fn default_style_is_valid() {
        assert!(validate_render_style(RenderStyle::default()).is_ok());
        let mut style = RenderStyle::default();
        style.hover_marker_radius = 0.0;
        assert!(validate_render_style(style).is_err());
    }
}
