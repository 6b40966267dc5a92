use std::time::{Duration, Instant};

use live_chart::api::{FetchOutcome, PollReport};
use live_chart::core::{RawPoint, SeriesConfig, SeriesId, SurfaceSize};
use live_chart::render::NullRenderer;
use live_chart::{ChartEngine, ChartEngineConfig, ChartError, SourceError};

const INTERVAL: Duration = Duration::from_secs(1);

fn engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(SurfaceSize::new(800, 600));
    ChartEngine::new(NullRenderer::default(), config).expect("engine init")
}

fn batch(times: &[f64]) -> Vec<RawPoint> {
    times.iter().map(|t| RawPoint::new(*t, 1.0)).collect()
}

#[test]
fn first_fetch_is_due_immediately() {
    let mut engine = engine();
    let t0 = Instant::now();
    engine.start_polling(SeriesId::MAIN, INTERVAL).expect("start");
    assert!(engine.is_polling(SeriesId::MAIN));

    let tickets = engine.due_fetches(t0);
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].series_id(), SeriesId::MAIN);
}

#[test]
fn at_most_one_fetch_in_flight_per_series() {
    let mut engine = engine();
    let t0 = Instant::now();
    engine.start_polling(SeriesId::MAIN, INTERVAL).expect("start");

    let ticket = engine.due_fetches(t0)[0];
    assert!(engine.due_fetches(t0).is_empty());
    assert!(engine.due_fetches(t0 + INTERVAL * 5).is_empty());
    assert!(engine.begin_fetch(SeriesId::MAIN, t0).is_none());

    let outcome = engine
        .complete_fetch(ticket, Ok(batch(&[1.0, 2.0])))
        .expect("complete");
    assert!(matches!(outcome, FetchOutcome::Merged(report) if report.added == 2));
    assert_eq!(engine.due_fetches(t0 + INTERVAL * 5).len(), 1);
}

#[test]
fn next_fetch_waits_for_the_interval() {
    let mut engine = engine();
    let t0 = Instant::now();
    engine.start_polling(SeriesId::MAIN, INTERVAL).expect("start");

    let ticket = engine.due_fetches(t0)[0];
    engine.complete_fetch(ticket, Ok(Vec::new())).expect("complete");

    assert!(engine.due_fetches(t0 + INTERVAL / 2).is_empty());
    assert_eq!(engine.due_fetches(t0 + INTERVAL).len(), 1);
}

#[test]
fn failure_marks_series_stale_until_next_success() {
    let mut engine = engine();
    let t0 = Instant::now();
    engine.start_polling(SeriesId::MAIN, INTERVAL).expect("start");

    let ticket = engine.due_fetches(t0)[0];
    let outcome = engine
        .complete_fetch(ticket, Err(SourceError::Unreachable("db down".to_owned())))
        .expect("complete");
    assert_eq!(outcome, FetchOutcome::Failed);
    assert!(engine.is_stale(SeriesId::MAIN));

    let status = &engine.fetch_statuses()[0];
    assert_eq!(status.consecutive_failures, 1);
    assert_eq!(status.interval_ms, Some(1_000));
    assert!(!status.in_flight);
    assert!(status
        .last_error
        .as_deref()
        .is_some_and(|e| e.contains("db down")));

    let retry = engine.due_fetches(t0 + INTERVAL)[0];
    engine
        .complete_fetch(retry, Ok(batch(&[5.0])))
        .expect("complete");
    assert!(!engine.is_stale(SeriesId::MAIN));
    assert_eq!(engine.fetch_statuses()[0].consecutive_failures, 0);
    assert_eq!(engine.points(SeriesId::MAIN).expect("points").len(), 1);
}

#[test]
fn tickets_outliving_stop_polling_are_ignored() {
    let mut engine = engine();
    let t0 = Instant::now();
    engine.start_polling(SeriesId::MAIN, INTERVAL).expect("start");
    let ticket = engine.due_fetches(t0)[0];

    assert!(engine.stop_polling(SeriesId::MAIN));
    assert!(!engine.is_polling(SeriesId::MAIN));
    engine.start_polling(SeriesId::MAIN, INTERVAL).expect("restart");

    let outcome = engine
        .complete_fetch(ticket, Ok(batch(&[1.0])))
        .expect("complete");
    assert_eq!(outcome, FetchOutcome::Ignored);
    assert!(engine.points(SeriesId::MAIN).expect("points").is_empty());
}

#[test]
fn removing_a_series_cancels_its_polling() {
    let mut engine = engine();
    let t0 = Instant::now();
    let overlay = engine
        .add_series(SeriesConfig::new("overlay"))
        .expect("overlay");
    engine.start_polling(overlay, INTERVAL).expect("start");
    let ticket = engine.due_fetches(t0)[0];

    engine.remove_series(overlay).expect("remove");
    assert!(!engine.is_polling(overlay));
    assert!(engine.fetch_statuses().is_empty());

    let outcome = engine
        .complete_fetch(ticket, Ok(batch(&[1.0])))
        .expect("complete");
    assert_eq!(outcome, FetchOutcome::Ignored);
}

#[test]
fn completions_after_shutdown_are_ignored() {
    let mut engine = engine();
    let t0 = Instant::now();
    engine.start_polling(SeriesId::MAIN, INTERVAL).expect("start");
    let ticket = engine.due_fetches(t0)[0];

    engine.shutdown();
    let outcome = engine
        .complete_fetch(ticket, Ok(batch(&[1.0])))
        .expect("complete");
    assert_eq!(outcome, FetchOutcome::Ignored);
    assert!(engine.points(SeriesId::MAIN).expect("points").is_empty());
    assert!(engine.due_fetches(t0 + INTERVAL).is_empty());
    assert!(!engine.is_polling(SeriesId::MAIN));
}

#[test]
fn start_polling_validates_arguments() {
    let mut engine = engine();
    assert!(matches!(
        engine.start_polling(SeriesId::MAIN, Duration::ZERO),
        Err(ChartError::InvalidConfig(_))
    ));

    let overlay = engine
        .add_series(SeriesConfig::new("overlay"))
        .expect("overlay");
    engine.remove_series(overlay).expect("remove");
    assert!(matches!(
        engine.start_polling(overlay, INTERVAL),
        Err(ChartError::UnknownSeries(_))
    ));
}

#[test]
fn on_demand_fetch_without_schedule() {
    let mut engine = engine();
    let t0 = Instant::now();
    let ticket = engine.begin_fetch(SeriesId::MAIN, t0).expect("ticket");
    assert!(!engine.is_polling(SeriesId::MAIN));
    assert!(engine.due_fetches(t0 + INTERVAL).is_empty());

    let outcome = engine
        .complete_fetch(ticket, Ok(batch(&[1.0, 2.0, 3.0])))
        .expect("complete");
    assert!(matches!(outcome, FetchOutcome::Merged(report) if report.added == 3));
}

#[test]
fn poll_source_runs_due_fetches_through_a_closure() {
    let mut engine = engine();
    let t0 = Instant::now();
    let overlay = engine
        .add_series(SeriesConfig::new("overlay"))
        .expect("overlay");
    engine.start_polling(SeriesId::MAIN, INTERVAL).expect("main");
    engine.start_polling(overlay, INTERVAL).expect("overlay");

    let mut calls = Vec::new();
    let mut source = |id: SeriesId| {
        calls.push(id);
        if id.is_main() {
            Ok(batch(&[1.0, 2.0]))
        } else {
            Err(SourceError::TimedOut)
        }
    };

    let report = engine.poll_source(&mut source, t0).expect("poll");
    assert_eq!(
        report,
        PollReport {
            fetched: 1,
            failed: 1,
            added: 2,
        }
    );
    assert!(engine.is_stale(overlay));

    let report = engine
        .poll_source(&mut source, t0 + INTERVAL / 2)
        .expect("poll");
    assert_eq!(report, PollReport::default());
    drop(source);
    assert_eq!(calls, vec![SeriesId::MAIN, overlay]);
}

#[test]
fn refresh_series_reports_transport_failures_as_errors() {
    let mut engine = engine();
    let t0 = Instant::now();

    let mut healthy = |_: SeriesId| Ok::<_, SourceError>(batch(&[1.0, 2.0]));
    let report = engine
        .refresh_series(&mut healthy, SeriesId::MAIN, t0)
        .expect("refresh");
    assert_eq!(report.added, 2);
    assert!(!engine.is_stale(SeriesId::MAIN));

    let mut broken =
        |_: SeriesId| Err::<Vec<RawPoint>, _>(SourceError::Unreachable("db offline".to_owned()));
    let err = engine
        .refresh_series(&mut broken, SeriesId::MAIN, t0)
        .expect_err("transport failure");
    assert!(matches!(
        err,
        ChartError::Source(SourceError::Unreachable(ref reason)) if reason == "db offline"
    ));
    assert!(engine.is_stale(SeriesId::MAIN));
    assert_eq!(engine.points(SeriesId::MAIN).expect("points").len(), 2);
}

#[test]
fn refresh_series_respects_single_flight_and_unknown_ids() {
    let mut engine = engine();
    let t0 = Instant::now();
    let _in_flight = engine.begin_fetch(SeriesId::MAIN, t0).expect("ticket");

    let mut source = |_: SeriesId| Ok::<_, SourceError>(batch(&[1.0]));
    let report = engine
        .refresh_series(&mut source, SeriesId::MAIN, t0)
        .expect("refresh");
    assert_eq!(report.added, 0);

    let overlay = engine
        .add_series(SeriesConfig::new("gone"))
        .expect("overlay");
    engine.remove_series(overlay).expect("remove");
    assert!(matches!(
        engine.refresh_series(&mut source, overlay, t0),
        Err(ChartError::UnknownSeries(id)) if id == overlay
    ));
}
