use live_chart::ChartError;
use live_chart::core::{RawPoint, SeriesConfig, SeriesId, SeriesPatch, SeriesRegistry};
use live_chart::render::Color;

fn points(pairs: &[(f64, f64)]) -> Vec<RawPoint> {
    pairs.iter().map(|(t, v)| RawPoint::new(*t, *v)).collect()
}

#[test]
fn new_registry_holds_only_the_main_series() {
    let registry = SeriesRegistry::new();
    assert_eq!(registry.len(), 1);

    let main = registry.get(SeriesId::MAIN).expect("main series");
    assert_eq!(main.name, "Main series");
    assert_eq!(main.color, Color::from_hex("#133592").expect("hex"));
    assert_eq!(main.width_px, 2.0);
    assert!(main.enabled);
    assert!(!main.dashed);
}

#[test]
fn main_series_cannot_be_removed() {
    let mut registry = SeriesRegistry::new();
    let err = registry
        .remove_series(SeriesId::MAIN)
        .expect_err("main is permanent");
    assert!(matches!(err, ChartError::MainSeriesRemoval));
    assert!(registry.contains(SeriesId::MAIN));
}

#[test]
fn removing_unknown_series_reports_its_id() {
    let mut registry = SeriesRegistry::new();
    let id = registry
        .add_series(SeriesConfig::new("overlay"))
        .expect("add overlay");
    registry.remove_series(id).expect("remove once");

    let err = registry.remove_series(id).expect_err("already removed");
    assert!(matches!(err, ChartError::UnknownSeries(missing) if missing == id));
}

#[test]
fn series_ids_are_never_reused() {
    let mut registry = SeriesRegistry::new();
    let first = registry.add_series(SeriesConfig::new("a")).expect("a");
    registry.remove_series(first).expect("remove a");
    let second = registry.add_series(SeriesConfig::new("b")).expect("b");

    assert_ne!(first, second);
    assert_eq!(second.to_string(), format!("series_{}", second.raw()));
    assert_eq!(SeriesId::MAIN.to_string(), "main");
}

#[test]
fn add_series_rejects_invalid_style() {
    let mut registry = SeriesRegistry::new();
    assert!(registry
        .add_series(SeriesConfig::new("bad").with_width(0.0))
        .is_err());
    assert!(registry
        .add_series(SeriesConfig::new("bad").with_color(Color::rgba(2.0, 0.0, 0.0, 1.0)))
        .is_err());
    assert_eq!(registry.len(), 1);
}

#[test]
fn draw_order_puts_main_last() {
    let mut registry = SeriesRegistry::new();
    let a = registry.add_series(SeriesConfig::new("a")).expect("a");
    let b = registry.add_series(SeriesConfig::new("b")).expect("b");
    let hidden = registry
        .add_series(SeriesConfig::new("hidden").enabled(false))
        .expect("hidden");

    let order: Vec<SeriesId> = registry.list_visible().iter().map(|s| s.id()).collect();
    assert_eq!(order, vec![a, b, SeriesId::MAIN]);
    assert!(!order.contains(&hidden));
}

#[test]
fn hidden_series_are_excluded_from_bounds() {
    let mut registry = SeriesRegistry::new();
    let overlay = registry
        .add_series(SeriesConfig::new("overlay"))
        .expect("overlay");
    registry
        .get_mut(SeriesId::MAIN)
        .expect("main")
        .points
        .merge(&points(&[(0.0, 1.0), (10.0, 2.0)]), SeriesId::MAIN);
    registry
        .get_mut(overlay)
        .expect("overlay")
        .points
        .merge(&points(&[(20.0, -50.0)]), overlay);

    let bounds = registry.visible_bounds().expect("bounds");
    assert_eq!(bounds.max_x, 20.0);
    assert_eq!(bounds.min_y, -50.0);
    assert_eq!(registry.latest_visible_time(), Some(20.0));

    registry.set_visible(overlay, false).expect("hide");
    let bounds = registry.visible_bounds().expect("bounds");
    assert_eq!(bounds.max_x, 10.0);
    assert_eq!(bounds.min_y, 1.0);
    assert_eq!(registry.latest_visible_time(), Some(10.0));

    registry.set_visible(SeriesId::MAIN, false).expect("hide main");
    assert!(registry.visible_bounds().is_none());
    assert!(!registry.has_visible_data());
}

#[test]
fn toggle_returns_new_visibility() {
    let mut registry = SeriesRegistry::new();
    assert!(!registry.toggle_visible(SeriesId::MAIN).expect("toggle"));
    assert!(registry.toggle_visible(SeriesId::MAIN).expect("toggle"));
}

#[test]
fn patch_updates_only_given_fields() {
    let mut registry = SeriesRegistry::new();
    let id = registry
        .add_series(SeriesConfig::new("overlay").with_width(3.0))
        .expect("overlay");

    registry
        .update_series(
            id,
            SeriesPatch {
                dashed: Some(true),
                name: Some("renamed".to_owned()),
                ..SeriesPatch::default()
            },
        )
        .expect("patch");

    let series = registry.get(id).expect("series");
    assert_eq!(series.name, "renamed");
    assert!(series.dashed);
    assert_eq!(series.width_px, 3.0);

    let invalid = SeriesPatch {
        width_px: Some(-1.0),
        name: Some("ignored".to_owned()),
        ..SeriesPatch::default()
    };
    assert!(registry.update_series(id, invalid).is_err());
    assert_eq!(registry.get(id).expect("series").name, "renamed");
}

#[test]
fn legend_lists_every_series_with_counts() {
    let mut registry = SeriesRegistry::new();
    let overlay = registry
        .add_series(SeriesConfig::new("overlay").dashed(true).enabled(false))
        .expect("overlay");
    registry
        .get_mut(SeriesId::MAIN)
        .expect("main")
        .points
        .merge(&points(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]), SeriesId::MAIN);

    let legend = registry.legend();
    assert_eq!(legend.len(), 2);
    assert_eq!(legend[0].id, SeriesId::MAIN);
    assert_eq!(legend[0].point_count, 3);
    assert_eq!(legend[1].id, overlay);
    assert!(legend[1].dashed);
    assert!(!legend[1].visible);
}
