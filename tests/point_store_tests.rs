use live_chart::core::{PointStore, RawPoint, RawTime, RawValue, SeriesId};

fn clock(time: &str, value: f64) -> RawPoint {
    RawPoint::new(time, value)
}

fn times_and_values(store: &PointStore) -> Vec<(f64, f64)> {
    store.points().iter().map(|p| (p.time, p.value)).collect()
}

#[test]
fn duplicate_key_in_batch_keeps_last_value() {
    let mut store = PointStore::new();
    let added = store.merge(
        &[
            clock("00:00:00", 10.0),
            clock("00:00:00.500", 20.0),
            clock("00:00:00", 99.0),
        ],
        SeriesId::MAIN,
    );

    assert_eq!(added, 2);
    assert_eq!(times_and_values(&store), vec![(0.0, 99.0), (0.5, 20.0)]);
}

#[test]
fn merging_the_same_batch_twice_is_idempotent() {
    let batch = vec![
        clock("00:00:01", 1.0),
        clock("00:00:02", 2.0),
        clock("00:00:03", 3.0),
    ];
    let mut store = PointStore::new();
    assert_eq!(store.merge(&batch, SeriesId::MAIN), 3);
    let first = times_and_values(&store);

    assert_eq!(store.merge(&batch, SeriesId::MAIN), 0);
    assert_eq!(times_and_values(&store), first);
}

#[test]
fn last_write_wins_across_merges() {
    let mut store = PointStore::new();
    store.merge(&[clock("00:00:01.000", 5.0)], SeriesId::MAIN);
    store.merge(&[clock("00:00:01.000", 9.0)], SeriesId::MAIN);

    assert_eq!(times_and_values(&store), vec![(1.0, 9.0)]);
}

#[test]
fn later_merge_replaces_value_for_existing_key() {
    let mut store = PointStore::new();
    store.merge(&[clock("00:00:05", 1.0)], SeriesId::MAIN);
    // 5.0004 s quantizes onto the same 1 ms key as 5 s.
    let report = store.merge_report(&[RawPoint::new(5.0004, 7.0)], SeriesId::MAIN);

    assert_eq!(report.added, 0);
    assert_eq!(report.replaced, 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.points()[0].value, 7.0);
}

#[test]
fn out_of_order_arrivals_are_sorted() {
    let mut store = PointStore::new();
    store.merge(&[clock("00:00:10", 10.0)], SeriesId::MAIN);
    store.merge(
        &[clock("00:00:02", 2.0), clock("00:00:12", 12.0), clock("00:00:01", 1.0)],
        SeriesId::MAIN,
    );

    let times: Vec<f64> = store.points().iter().map(|p| p.time).collect();
    assert_eq!(times, vec![1.0, 2.0, 10.0, 12.0]);
    assert_eq!(store.latest_time(), Some(12.0));
}

#[test]
fn malformed_points_are_discarded_silently() {
    let mut store = PointStore::new();
    let batch = vec![
        RawPoint {
            time: None,
            value: Some(RawValue::Number(1.0)),
            overload: false,
        },
        RawPoint {
            time: Some(RawTime::Seconds(1.0)),
            value: None,
            overload: false,
        },
        RawPoint::new(2.0, "not a number"),
        RawPoint::new(3.0, f64::NAN),
        RawPoint::new(4.0, "12.5 volts"),
    ];
    let report = store.merge_report(&batch, SeriesId::MAIN);

    assert_eq!(report.added, 1);
    assert_eq!(report.discarded, 4);
    assert_eq!(times_and_values(&store), vec![(4.0, 12.5)]);
}

#[test]
fn unparseable_time_falls_back_to_batch_ordinal() {
    let mut store = PointStore::new();
    store.merge(
        &[
            clock("00:00:00", 1.0),
            clock("00:00:01", 2.0),
            clock("not-a-time", 3.0),
        ],
        SeriesId::MAIN,
    );

    let third = store
        .points()
        .iter()
        .find(|p| p.value == 3.0)
        .expect("third point kept");
    assert_eq!(third.time, 2.0);
    assert_eq!(third.original_time, RawTime::Text("not-a-time".to_owned()));
}

#[test]
fn window_queries_use_inclusive_bounds() {
    let mut store = PointStore::new();
    let batch: Vec<RawPoint> = (0..100)
        .map(|i| RawPoint::new(f64::from(i) * 0.5, f64::from(i)))
        .collect();
    store.merge(&batch, SeriesId::MAIN);

    let window = store.points_in_window(10.0, 20.0);
    assert_eq!(window.len(), 21);
    assert_eq!(window.first().map(|p| p.time), Some(10.0));
    assert_eq!(window.last().map(|p| p.time), Some(20.0));

    let bounds = store.bounds_in_window(10.0, 20.0).expect("bounds");
    assert_eq!(bounds.min_y, 20.0);
    assert_eq!(bounds.max_y, 40.0);
}

#[test]
fn overload_flag_is_carried_through() {
    let mut store = PointStore::new();
    store.merge(
        &[RawPoint::new(1.0, 1.0).with_overload(true), RawPoint::new(2.0, 1.0)],
        SeriesId::MAIN,
    );
    let flags: Vec<bool> = store.points().iter().map(|p| p.overload).collect();
    assert_eq!(flags, vec![true, false]);
}
