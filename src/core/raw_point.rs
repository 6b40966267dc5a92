use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Time field of an observation as delivered by a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTime {
    /// Already-numeric seconds.
    Seconds(f64),
    /// Wall-clock instant, converted through epoch seconds.
    DateTime(DateTime<Utc>),
    /// Textual time: `HH:MM:SS[.mmm]`, a date string, or a bare number.
    Text(String),
}

impl From<f64> for RawTime {
    fn from(value: f64) -> Self {
        Self::Seconds(value)
    }
}

impl From<&str> for RawTime {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawTime {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for RawTime {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

/// Value field of an observation as delivered by a data source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    /// SQL `NUMERIC` columns decoded by the host.
    #[serde(skip)]
    Decimal(Decimal),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

/// Canonical boundary shape consumed by the point store.
///
/// Missing fields are representable so validation happens in one place
/// (`PointStore::merge`) instead of in every adapter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPoint {
    #[serde(default)]
    pub time: Option<RawTime>,
    #[serde(default)]
    pub value: Option<RawValue>,
    #[serde(default)]
    pub overload: bool,
}

impl RawPoint {
    #[must_use]
    pub fn new(time: impl Into<RawTime>, value: impl Into<RawValue>) -> Self {
        Self {
            time: Some(time.into()),
            value: Some(value.into()),
            overload: false,
        }
    }

    #[must_use]
    pub fn with_overload(mut self, overload: bool) -> Self {
        self.overload = overload;
        self
    }
}
