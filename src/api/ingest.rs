//! Boundary between external row sources and the point store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{RawPoint, RawTime, RawValue, SeriesId};
use crate::error::{ChartError, ChartResult, SourceError};

/// Blocking source of raw points for one series.
///
/// Async hosts use the ticket protocol (`due_fetches` / `complete_fetch`)
/// instead and never need this trait.
pub trait DataSource {
    fn fetch(&mut self, series_id: SeriesId) -> Result<Vec<RawPoint>, SourceError>;
}

impl<F> DataSource for F
where
    F: FnMut(SeriesId) -> Result<Vec<RawPoint>, SourceError>,
{
    fn fetch(&mut self, series_id: SeriesId) -> Result<Vec<RawPoint>, SourceError> {
        self(series_id)
    }
}

/// Maps heterogeneous JSON rows onto `RawPoint` using explicit field names.
///
/// Missing or wrongly-typed fields become `None`, leaving rejection to the
/// point store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordAdapter {
    pub time_field: String,
    pub value_field: String,
    #[serde(default)]
    pub overload_field: Option<String>,
}

impl Default for RecordAdapter {
    fn default() -> Self {
        Self::new("time", "value").with_overload_field(Some("overload"))
    }
}

impl RecordAdapter {
    #[must_use]
    pub fn new(time_field: impl Into<String>, value_field: impl Into<String>) -> Self {
        Self {
            time_field: time_field.into(),
            value_field: value_field.into(),
            overload_field: None,
        }
    }

    /// Row shape of the measurement tables: `measurement_time`,
    /// `current_value`, `is_overload`.
    #[must_use]
    pub fn measurement_rows() -> Self {
        Self::new("measurement_time", "current_value").with_overload_field(Some("is_overload"))
    }

    #[must_use]
    pub fn with_overload_field(mut self, field: Option<&str>) -> Self {
        self.overload_field = field.map(str::to_owned);
        self
    }

    #[must_use]
    pub fn adapt_row(&self, row: &Value) -> RawPoint {
        let time = row.get(&self.time_field).and_then(raw_time_from_json);
        let value = row.get(&self.value_field).and_then(raw_value_from_json);
        let overload = self
            .overload_field
            .as_deref()
            .and_then(|field| row.get(field))
            .is_some_and(overload_from_json);
        RawPoint {
            time,
            value,
            overload,
        }
    }

    #[must_use]
    pub fn adapt_rows(&self, rows: &[Value]) -> Vec<RawPoint> {
        rows.iter().map(|row| self.adapt_row(row)).collect()
    }

    /// Parses a JSON array of row objects.
    pub fn adapt_json_str(&self, input: &str) -> ChartResult<Vec<RawPoint>> {
        let rows: Vec<Value> = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse rows json: {e}")))?;
        Ok(self.adapt_rows(&rows))
    }
}

fn raw_time_from_json(value: &Value) -> Option<RawTime> {
    match value {
        Value::Number(number) => number.as_f64().map(RawTime::Seconds),
        Value::String(text) => Some(RawTime::Text(text.clone())),
        _ => None,
    }
}

fn raw_value_from_json(value: &Value) -> Option<RawValue> {
    match value {
        Value::Number(number) => number.as_f64().map(RawValue::Number),
        // NUMERIC columns usually arrive as exact decimal strings.
        Value::String(text) => Some(match text.trim().parse::<Decimal>() {
            Ok(decimal) => RawValue::Decimal(decimal),
            Err(_) => RawValue::Text(text.clone()),
        }),
        _ => None,
    }
}

fn overload_from_json(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(text.trim(), "true" | "t" | "1"),
        _ => false,
    }
}
