//! Timestamp parsing and formatting helpers for LogSleuth.
//!
//! Provides consistent date/time display across the entire UI, plus the
//! conversions used to normalise the two timestamp shapes found in log
//! records (epoch numbers and date-time strings).

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Numeric timestamps above this are taken to be epoch milliseconds.
const EPOCH_MILLIS_THRESHOLD: f64 = 1e11;

/// Format a UTC timestamp for display in the log table.
///
/// Shows local time in `YYYY-MM-DD HH:MM:SS` format. This is the compact
/// format used in table rows where horizontal space is limited.
pub fn format_table_timestamp(ts: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = ts.with_timezone(&Local);
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a UTC timestamp for the detail panel.
///
/// Shows full precision including milliseconds and the UTC offset,
/// e.g. `2024-01-15 10:23:45.123 +0000`.
pub fn format_detail_timestamp(ts: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = ts.with_timezone(&Local);
    local.format("%Y-%m-%d %H:%M:%S%.3f %z").to_string()
}

/// Format a `std::time::Duration` into a human-readable string.
///
/// Used in the status bar to show how long the last load took.
/// Examples: `0.3ms`, `1.2s`, `1.5m`.
pub fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.01 {
        format!("{:.1}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = secs / 60.0;
        format!("{mins:.1}m")
    }
}

/// Build a UTC timestamp from epoch seconds plus an optional nanosecond part.
///
/// Returns `None` when the value is outside chrono's representable range.
pub fn from_epoch(seconds: i64, nanos: u32) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, nanos).single()
}

/// Interpret a bare number as an epoch timestamp.
///
/// Values up to 1e11 are seconds (fractional part kept as sub-second
/// precision); larger values are milliseconds.
pub fn from_epoch_number(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }
    if value.abs() > EPOCH_MILLIS_THRESHOLD {
        return Utc.timestamp_millis_opt(value as i64).single();
    }
    let secs = value.floor();
    let nanos = ((value - secs) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    from_epoch(secs as i64, nanos)
}

/// Parse a timestamp string as found in event logs.
///
/// Accepts RFC 3339 (`2024-06-15T14:30:00.123+02:00`, `...Z`) and the
/// offset-less forms `YYYY-MM-DDTHH:MM:SS[.fff]` and
/// `YYYY-MM-DD HH:MM:SS[.fff]`, which are taken as UTC.
pub fn parse_timestamp_text(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_millis() {
        let d = std::time::Duration::from_millis(5);
        let s = format_duration(d);
        assert!(s.contains("ms"), "Expected ms, got: {s}");
    }

    #[test]
    fn test_format_duration_seconds() {
        let d = std::time::Duration::from_millis(1200);
        assert_eq!(format_duration(d), "1.2s");
    }

    #[test]
    fn test_epoch_number_seconds_and_millis_agree() {
        let from_secs = from_epoch_number(1_700_000_000.0).unwrap();
        let from_millis = from_epoch_number(1_700_000_000_000.0).unwrap();
        assert_eq!(from_secs, from_millis);
    }

    #[test]
    fn test_epoch_number_keeps_fraction() {
        let ts = from_epoch_number(100.5).unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_parse_timestamp_rfc3339_with_offset() {
        let ts = parse_timestamp_text("2024-06-15T14:30:00+02:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_empty() {
        assert!(parse_timestamp_text("").is_none());
        assert!(parse_timestamp_text("yesterday").is_none());
    }
}
