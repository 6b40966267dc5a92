use thiserror::Error;

use crate::core::SeriesId;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid surface size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown series: {0}")]
    UnknownSeries(SeriesId),

    #[error("the main series cannot be removed")]
    MainSeriesRemoval,

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Failure reported by an external data source for one fetch.
///
/// These never abort the chart: the engine records the series as stale and
/// retries on the next poll tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("data source unreachable: {0}")]
    Unreachable(String),

    #[error("data source returned a malformed payload: {0}")]
    Malformed(String),

    #[error("data source request timed out")]
    TimedOut,
}
