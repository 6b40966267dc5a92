//! Conversion between source time representations and canonical seconds.
//!
//! Every function here is total: malformed input degrades to a deterministic
//! fallback so a bad row never aborts ingestion of its batch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;

use crate::core::primitives::datetime_to_unix_seconds;
use crate::core::raw_point::{RawTime, RawValue};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Converts a raw time into seconds.
///
/// `ordinal` is the point's position in its batch and is used when nothing
/// else parses, so malformed rows are placed by arrival order.
#[must_use]
pub fn parse_time(raw: &RawTime, ordinal: usize) -> f64 {
    let parsed = match raw {
        RawTime::Seconds(seconds) => Some(*seconds),
        RawTime::DateTime(time) => Some(datetime_to_unix_seconds(*time)),
        RawTime::Text(text) => parse_time_text(text),
    };

    match parsed {
        Some(seconds) if seconds.is_finite() => seconds,
        _ => ordinal as f64,
    }
}

/// Converts a raw value into a finite number, or `None` when it has none.
#[must_use]
pub fn parse_value(raw: &RawValue) -> Option<f64> {
    let value = match raw {
        RawValue::Number(value) => Some(*value),
        RawValue::Decimal(value) => value.to_f64(),
        RawValue::Text(text) => parse_float_prefix(text),
    }?;
    value.is_finite().then_some(value)
}

fn parse_time_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    parse_clock(trimmed)
        .or_else(|| parse_date(trimmed))
        .or_else(|| parse_float_prefix(trimmed))
}

/// Parses `H+:MM:SS` with an optional fractional-second suffix.
fn parse_clock(text: &str) -> Option<f64> {
    let (clock, fraction) = match text.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (text, None),
    };

    let mut parts = clock.split(':');
    let hours = parts.next()?;
    let minutes = parts.next()?;
    let seconds = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let hours = parse_digits(hours, 1, usize::MAX)?;
    let minutes = parse_digits(minutes, 1, 2)?;
    let seconds = parse_digits(seconds, 1, 2)?;
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    // Fraction digits are a millisecond count: ".5" is 5 ms, ".500" is 500 ms.
    let fraction = match fraction {
        Some(digits) => parse_digits(digits, 1, 9)? as f64 / 1000.0,
        None => 0.0,
    };

    Some(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64 + fraction)
}

fn parse_digits(text: &str, min_len: usize, max_len: usize) -> Option<u64> {
    if text.len() < min_len || text.len() > max_len || !text.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    text.parse().ok()
}

fn parse_date(text: &str) -> Option<f64> {
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime_to_unix_seconds(time.with_timezone(&Utc)));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime_to_unix_seconds(naive.and_utc()));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| datetime_to_unix_seconds(naive.and_utc()))
}

/// Parses the longest leading decimal literal, like JavaScript `parseFloat`.
#[must_use]
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        let sign = if bytes.first() == Some(&b'-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || mantissa_digits > 0 {
            mantissa_digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}

/// Formats seconds for the time axis: `H:MM:SS.ss`, `M:SS.ss` or `S.ss s`.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "-".to_owned();
    }

    let sign = if seconds < 0.0 { "-" } else { "" };
    let magnitude = seconds.abs();
    let hours = (magnitude / 3600.0).floor();
    let minutes = ((magnitude % 3600.0) / 60.0).floor();
    let secs = magnitude % 60.0;

    if hours > 0.0 {
        format!("{sign}{hours}:{minutes:02}:{secs:05.2}")
    } else if minutes > 0.0 {
        format!("{sign}{minutes}:{secs:05.2}")
    } else {
        format!("{sign}{secs:.2}s")
    }
}

/// Formats a value-axis label with two decimals.
#[must_use]
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}
