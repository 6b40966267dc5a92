use chrono::{DateTime, Utc};

/// Resolution of the deduplication key: one key per millisecond.
pub const QUANTIZATION_PER_SECOND: f64 = 1000.0;

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Rounds seconds to the millisecond key used for deduplication.
///
/// Rounding is monotone, so ordering points by key never contradicts
/// ordering them by time.
#[must_use]
pub fn quantize_time(seconds: f64) -> i64 {
    (seconds * QUANTIZATION_PER_SECOND).round() as i64
}

/// Nice grid step (1, 2 or 5 times a power of ten) close to `raw_step`.
#[must_use]
pub fn nice_step(raw_step: f64) -> f64 {
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 1.0;
    }

    let exponent = raw_step.log10().floor();
    let magnitude = 10f64.powf(exponent);
    let fraction = raw_step / magnitude;
    let nice_fraction = if fraction < 1.5 {
        1.0
    } else if fraction < 3.0 {
        2.0
    } else if fraction < 7.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_rounds_to_millisecond() {
        assert_eq!(quantize_time(1.0004), 1000);
        assert_eq!(quantize_time(1.0006), 1001);
        assert_eq!(quantize_time(-0.0004), 0);
    }

    #[test]
    fn nice_step_snaps_to_one_two_five() {
        assert_eq!(nice_step(0.0), 1.0);
        assert!((nice_step(1.2) - 1.0).abs() <= 1e-12);
        assert!((nice_step(2.4) - 2.0).abs() <= 1e-12);
        assert!((nice_step(45.0) - 50.0).abs() <= 1e-9);
        assert!((nice_step(0.08) - 0.1).abs() <= 1e-12);
    }
}
