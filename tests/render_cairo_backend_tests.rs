#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use live_chart::core::{RawPoint, SurfaceSize};
use live_chart::render::CairoRenderer;
use live_chart::{ChartEngine, ChartEngineConfig, ChartError};

fn samples() -> Vec<RawPoint> {
    vec![
        RawPoint::new(10.0, 10.0),
        RawPoint::new(20.0, 20.0).with_overload(true),
        RawPoint::new(40.0, 15.0),
    ]
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_every_primitive_group() {
    let renderer = CairoRenderer::new(900, 500).expect("renderer");
    let config = ChartEngineConfig::new(SurfaceSize::new(900, 500));
    let mut engine = ChartEngine::new(renderer, config).expect("engine init");
    engine.merge_main(&samples()).expect("merge");
    engine.set_viewport_rect(0.0, 50.0, 0.0, 30.0);
    engine.pointer_move(360.0, 100.0);

    engine.render().expect("render");
    let stats = engine.renderer().last_stats();
    assert_eq!(stats.rects_drawn, 1);
    assert_eq!(stats.polylines_drawn, 1);
    // One overload marker, three dense markers and the hover marker.
    assert_eq!(stats.circles_drawn, 5);
    assert!(stats.lines_drawn >= 4);
    assert!(stats.texts_drawn > 0);
}

#[test]
fn cairo_renderer_draws_into_external_context() {
    let surface = ImageSurface::create(Format::ARgb32, 640, 360).expect("surface");
    let context = Context::new(&surface).expect("context");

    let renderer = CairoRenderer::new(640, 360).expect("renderer");
    let config = ChartEngineConfig::new(SurfaceSize::new(640, 360));
    let mut engine = ChartEngine::new(renderer, config).expect("engine init");
    engine.merge_main(&samples()).expect("merge");

    engine
        .render_on_cairo_context(&context)
        .expect("render on context");
    assert_eq!(engine.renderer().last_stats().polylines_drawn, 1);
    assert_eq!(engine.frames_rendered(), 1);
}
