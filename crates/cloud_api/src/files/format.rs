//! Display formatting for file sizes and modification dates.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const SIZE_STEP: f64 = 1000.0;

/// Label used when a size does not fit any known unit.
pub const SIZE_OVERFLOW_LABEL: &str = "Too much";

/// Formats a byte count with decimal (1000-based) units and at most two fraction digits.
///
/// The value is divided while it stays strictly above 1000, so `1000` is still rendered in the
/// smaller unit. Anything beyond terabytes renders as [`SIZE_OVERFLOW_LABEL`].
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value > SIZE_STEP {
        value /= SIZE_STEP;
        unit += 1;
    }

    match SIZE_UNITS.get(unit) {
        Some(label) => format!("{} {label}", (value * 100.0).round() / 100.0),
        None => SIZE_OVERFLOW_LABEL.to_string(),
    }
}

/// Formats a unix-millisecond timestamp as a short `M/D/YYYY` date in `tz`.
///
/// Out-of-range timestamps render as an empty string.
pub fn format_last_modified<Tz>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|utc| utc.with_timezone(tz).format("%-m/%-d/%Y").to_string())
        .unwrap_or_default()
}

/// Formats a unix-millisecond timestamp in the local time zone of the host (browser).
pub fn format_last_modified_local(timestamp_ms: i64) -> String {
    format_last_modified(timestamp_ms, &Local)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    #[test]
    fn format_size_matches_expected_cases() {
        let cases = [
            (0, "0 B"),
            (999, "999 B"),
            (1_000, "1000 B"),
            (1_001, "1 KB"),
            (1_500, "1.5 KB"),
            (2_345_678, "2.35 MB"),
            (7_000_000_000, "7 GB"),
            (12_340_000_000_000, "12.34 TB"),
        ];
        for (bytes, expected) in cases {
            assert_eq!(format_size(bytes), expected, "bytes={bytes}");
        }
    }

    #[test]
    fn format_size_overflows_past_terabytes() {
        assert_eq!(format_size(2_000_000_000_000_000), SIZE_OVERFLOW_LABEL);
        assert_eq!(format_size(u64::MAX), SIZE_OVERFLOW_LABEL);
    }

    #[test]
    fn format_last_modified_uses_short_date() {
        // 2024-03-05T23:30:00Z
        let ts = 1_709_681_400_000;
        assert_eq!(format_last_modified(ts, &Utc), "3/5/2024");

        let east = FixedOffset::east_opt(2 * 3600).expect("offset");
        assert_eq!(format_last_modified(ts, &east), "3/6/2024");
    }

    #[test]
    fn format_last_modified_tolerates_out_of_range() {
        assert_eq!(format_last_modified(i64::MAX, &Utc), "");
    }
}
