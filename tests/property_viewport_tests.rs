use live_chart::core::{ScaleBounds, SurfaceSize, Viewport, WorldPoint};
use proptest::prelude::*;

fn viewport_strategy() -> impl Strategy<Value = Viewport> {
    (
        -1e6f64..1e6,
        1e-3f64..1e5,
        -1e6f64..1e6,
        1e-3f64..1e5,
    )
        .prop_map(|(min_x, span_x, min_y, span_y)| {
            Viewport::new(min_x, min_x + span_x, min_y, min_y + span_y)
        })
}

fn surface_strategy() -> impl Strategy<Value = SurfaceSize> {
    (1u32..4_000, 1u32..4_000).prop_map(|(w, h)| SurfaceSize::new(w, h))
}

proptest! {
    #[test]
    fn screen_world_round_trip_is_stable(
        viewport in viewport_strategy(),
        surface in surface_strategy(),
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0
    ) {
        let world = WorldPoint::new(
            viewport.min_x() + fx * viewport.x_span(),
            viewport.min_y() + fy * viewport.y_span(),
        );
        let screen = viewport.world_to_screen(world, surface).expect("project");
        let back = viewport.screen_to_world(screen, surface).expect("unproject");

        let tol_x = viewport.x_span().max(viewport.min_x().abs()) * 1e-9;
        let tol_y = viewport.y_span().max(viewport.min_y().abs()) * 1e-9;
        prop_assert!((back.x - world.x).abs() <= tol_x.max(1e-9));
        prop_assert!((back.y - world.y).abs() <= tol_y.max(1e-9));
    }

    #[test]
    fn spans_never_drop_below_min_span(
        viewport in viewport_strategy(),
        factors in prop::collection::vec(0.05f64..20.0, 1..30),
        pans in prop::collection::vec((-1e4f64..1e4, -1e4f64..1e4), 1..30)
    ) {
        let mut viewport = viewport;
        let bounds = ScaleBounds { min: 1e-6, max: 1e12 };
        for (factor, (dx, dy)) in factors.iter().zip(pans.iter()) {
            viewport.zoom_centered(*factor, bounds);
            viewport.pan_by(*dx, *dy);
            prop_assert!(viewport.x_span() >= viewport.min_span() * 0.99);
            prop_assert!(viewport.y_span() >= viewport.min_span() * 0.99);
        }
    }

    #[test]
    fn magnification_stays_within_bounds(
        factors in prop::collection::vec(0.1f64..10.0, 1..60)
    ) {
        let mut viewport = Viewport::default();
        let bounds = ScaleBounds::default();
        for factor in factors {
            viewport.zoom_at(WorldPoint::new(50.0, 50.0), factor, bounds);
            prop_assert!(viewport.scale() >= bounds.min - 1e-12);
            prop_assert!(viewport.scale() <= bounds.max + 1e-12);
        }
    }
}

proptest! {
    #[test]
    fn collapsed_rect_keeps_min_span_at_any_magnitude(
        mantissa in -10.0f64..10.0,
        exponent in 0i32..300,
        jitter in 0.0f64..1e-7,
    ) {
        let at = mantissa * 10f64.powi(exponent);
        let viewport = Viewport::new(at, at + jitter, at, at);

        prop_assert!(viewport.min_x() < viewport.max_x());
        prop_assert!(viewport.min_y() < viewport.max_y());
        prop_assert!(viewport.x_span() >= 1e-6);
        prop_assert!(viewport.y_span() >= 1e-6);
        prop_assert!(viewport
            .world_to_screen(WorldPoint::new(at, at), SurfaceSize::new(800, 600))
            .is_ok());
    }
}
