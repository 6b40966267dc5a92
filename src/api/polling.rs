//! Periodic fetch scheduling with single-flight tickets.
//!
//! The engine never performs I/O itself: hosts ask for due tickets, run the
//! fetches on whatever runtime they use, and hand results back.

use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::core::{MergeReport, RawPoint, SeriesId};
use crate::error::{ChartError, ChartResult, SourceError};
use crate::render::Renderer;

use super::{ChartEngine, DataSource};

/// Permission to run one fetch for one series.
///
/// A ticket is only honored while it is the series' in-flight fetch; tickets
/// outliving `stop_polling`, series removal or `shutdown` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    series_id: SeriesId,
    sequence: u64,
}

impl FetchTicket {
    #[must_use]
    pub fn series_id(self) -> SeriesId {
        self.series_id
    }
}

/// What `complete_fetch` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Merged(MergeReport),
    Failed,
    Ignored,
}

/// Per-series polling health, exposed in snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchStatus {
    pub series_id: SeriesId,
    pub interval_ms: Option<u64>,
    pub in_flight: bool,
    pub stale: bool,
    pub consecutive_failures: u32,
    pub last_error: Option<String>,
}

/// Aggregate result of `poll_source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollReport {
    pub fetched: usize,
    pub failed: usize,
    pub added: usize,
}

#[derive(Debug, Clone)]
struct PollEntry {
    interval: Option<Duration>,
    next_due: Option<Instant>,
    in_flight: Option<u64>,
    stale: bool,
    consecutive_failures: u32,
    last_error: Option<SourceError>,
}

impl PollEntry {
    fn new(interval: Option<Duration>) -> Self {
        Self {
            interval,
            next_due: None,
            in_flight: None,
            stale: false,
            consecutive_failures: 0,
            last_error: None,
        }
    }

    fn is_due(&self, now: Instant) -> bool {
        self.interval.is_some()
            && self.in_flight.is_none()
            && self.next_due.is_none_or(|due| now >= due)
    }
}

#[derive(Debug, Clone, Default)]
pub(super) struct PollingState {
    entries: IndexMap<SeriesId, PollEntry>,
    next_sequence: u64,
}

impl PollingState {
    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Forgets a series; returns whether it had any polling state.
    pub(super) fn stop(&mut self, id: SeriesId) -> bool {
        self.entries.shift_remove(&id).is_some()
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
    }

    fn issue(&mut self, id: SeriesId, now: Instant) -> Option<FetchTicket> {
        let sequence = self.next_sequence;
        let entry = self.entries.get_mut(&id)?;
        if entry.in_flight.is_some() {
            return None;
        }
        entry.in_flight = Some(sequence);
        entry.next_due = entry.interval.map(|interval| now + interval);
        self.next_sequence += 1;
        Some(FetchTicket {
            series_id: id,
            sequence,
        })
    }

    /// Releases a ticket; `None` when it is not the series' in-flight fetch.
    fn settle(&mut self, ticket: FetchTicket) -> Option<&mut PollEntry> {
        let entry = self.entries.get_mut(&ticket.series_id)?;
        if entry.in_flight != Some(ticket.sequence) {
            return None;
        }
        entry.in_flight = None;
        Some(entry)
    }

    fn statuses(&self) -> Vec<FetchStatus> {
        self.entries
            .iter()
            .map(|(id, entry)| FetchStatus {
                series_id: *id,
                interval_ms: entry
                    .interval
                    .map(|interval| u64::try_from(interval.as_millis()).unwrap_or(u64::MAX)),
                in_flight: entry.in_flight.is_some(),
                stale: entry.stale,
                consecutive_failures: entry.consecutive_failures,
                last_error: entry.last_error.as_ref().map(ToString::to_string),
            })
            .collect()
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Schedules periodic fetches for a series; the first one is due immediately.
    pub fn start_polling(&mut self, id: SeriesId, interval: Duration) -> ChartResult<()> {
        self.core.registry.get(id)?;
        if interval.is_zero() {
            return Err(ChartError::InvalidConfig(
                "polling interval must be > 0".to_owned(),
            ));
        }
        if self.core.runtime.shut_down {
            return Ok(());
        }

        let entry = self
            .core
            .polling
            .entries
            .entry(id)
            .or_insert_with(|| PollEntry::new(Some(interval)));
        entry.interval = Some(interval);
        entry.next_due = None;
        debug!(series = %id, interval_ms = interval.as_millis() as u64, "start polling");
        Ok(())
    }

    /// Cancels polling for a series; an in-flight result will be ignored.
    pub fn stop_polling(&mut self, id: SeriesId) -> bool {
        let stopped = self.core.polling.stop(id);
        if stopped {
            debug!(series = %id, "stop polling");
        }
        stopped
    }

    #[must_use]
    pub fn is_polling(&self, id: SeriesId) -> bool {
        self.core
            .polling
            .entries
            .get(&id)
            .is_some_and(|entry| entry.interval.is_some())
    }

    /// Tickets for every polled series whose interval elapsed and that has
    /// no fetch in flight.
    pub fn due_fetches(&mut self, now: Instant) -> Vec<FetchTicket> {
        if self.core.runtime.shut_down {
            return Vec::new();
        }
        let due: Vec<SeriesId> = self
            .core
            .polling
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_due(now))
            .map(|(id, _)| *id)
            .collect();

        let tickets: Vec<FetchTicket> = due
            .into_iter()
            .filter_map(|id| self.core.polling.issue(id, now))
            .collect();
        if !tickets.is_empty() {
            trace!(count = tickets.len(), "due fetches");
        }
        tickets
    }

    /// Starts an on-demand fetch; `None` while one is already in flight.
    pub fn begin_fetch(&mut self, id: SeriesId, now: Instant) -> Option<FetchTicket> {
        if self.core.runtime.shut_down || !self.core.registry.contains(id) {
            return None;
        }
        self.core
            .polling
            .entries
            .entry(id)
            .or_insert_with(|| PollEntry::new(None));
        self.core.polling.issue(id, now)
    }

    /// Hands a fetch result back to the engine.
    ///
    /// Success merges and clears the stale flag. Failure marks the series
    /// stale and the fetch is retried when it is next due. Results for
    /// unknown tickets, removed series or a shut-down engine are ignored.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<RawPoint>, SourceError>,
    ) -> ChartResult<FetchOutcome> {
        let id = ticket.series_id;
        if self.core.runtime.shut_down || !self.core.registry.contains(id) {
            trace!(series = %id, "ignore fetch completion");
            return Ok(FetchOutcome::Ignored);
        }
        let Some(entry) = self.core.polling.settle(ticket) else {
            trace!(series = %id, "ignore stale fetch ticket");
            return Ok(FetchOutcome::Ignored);
        };

        match result {
            Ok(raw) => {
                entry.stale = false;
                entry.consecutive_failures = 0;
                entry.last_error = None;
                let report = self.merge_points(id, &raw)?;
                Ok(FetchOutcome::Merged(report))
            }
            Err(error) => {
                entry.stale = true;
                entry.consecutive_failures = entry.consecutive_failures.saturating_add(1);
                warn!(
                    series = %id,
                    failures = entry.consecutive_failures,
                    error = %error,
                    "fetch failed; series marked stale"
                );
                entry.last_error = Some(error);
                Ok(FetchOutcome::Failed)
            }
        }
    }

    /// Runs every due fetch through a blocking source.
    pub fn poll_source<S: DataSource>(
        &mut self,
        source: &mut S,
        now: Instant,
    ) -> ChartResult<PollReport> {
        let mut report = PollReport::default();
        for ticket in self.due_fetches(now) {
            let result = source.fetch(ticket.series_id);
            match self.complete_fetch(ticket, result)? {
                FetchOutcome::Merged(merge) => {
                    report.fetched += 1;
                    report.added += merge.added;
                }
                FetchOutcome::Failed => report.failed += 1,
                FetchOutcome::Ignored => {}
            }
        }
        Ok(report)
    }

    /// Fetches one series now through a blocking source, outside the schedule.
    ///
    /// Status is recorded like any other completion; a transport failure is
    /// also returned as `ChartError::Source`. With a fetch already in flight
    /// nothing is fetched and an empty report is returned.
    pub fn refresh_series<S: DataSource>(
        &mut self,
        source: &mut S,
        id: SeriesId,
        now: Instant,
    ) -> ChartResult<MergeReport> {
        if !self.core.registry.contains(id) {
            return Err(ChartError::UnknownSeries(id));
        }
        let Some(ticket) = self.begin_fetch(id, now) else {
            return Ok(MergeReport::default());
        };

        match source.fetch(id) {
            Ok(raw) => match self.complete_fetch(ticket, Ok(raw))? {
                FetchOutcome::Merged(report) => Ok(report),
                FetchOutcome::Failed | FetchOutcome::Ignored => Ok(MergeReport::default()),
            },
            Err(error) => {
                self.complete_fetch(ticket, Err(error.clone()))?;
                Err(error.into())
            }
        }
    }

    /// Whether the last fetch for `id` failed.
    #[must_use]
    pub fn is_stale(&self, id: SeriesId) -> bool {
        self.core
            .polling
            .entries
            .get(&id)
            .is_some_and(|entry| entry.stale)
    }

    #[must_use]
    pub fn fetch_statuses(&self) -> Vec<FetchStatus> {
        self.core.polling.statuses()
    }
}
