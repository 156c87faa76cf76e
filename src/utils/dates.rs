//! Date and time utilities

use chrono::{DateTime, NaiveDate, Utc};

/// Milliseconds since the Unix epoch, used as a generation run id
pub fn generation_id(now: DateTime<Utc>) -> i64 {
    now.timestamp_millis()
}

/// Track length as "m:ss"
pub fn format_duration(milliseconds: u64) -> String {
    let minutes = milliseconds / 60_000;
    let seconds = (milliseconds % 60_000) / 1000;
    format!("{}:{:02}", minutes, seconds)
}

/// Cart length as "Xh Ym", or "Ym" under an hour
pub fn format_total_duration(milliseconds: u64) -> String {
    let hours = milliseconds / 3_600_000;
    let minutes = (milliseconds % 3_600_000) / 60_000;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Calendar day a timestamp falls on
pub fn day_of(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// Day heading, e.g. "Fri Oct 16 2026"
pub fn day_label(day: NaiveDate) -> String {
    day.format("%a %b %d %Y").to_string()
}

/// Relative time string, e.g. "2 hours ago"
pub fn timestamp_to_relative(timestamp: DateTime<Utc>) -> String {
    chrono_humanize::HumanTime::from(timestamp).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(185_000), "3:05");
        assert_eq!(format_duration(59_999), "0:59");
    }

    #[test]
    fn test_format_total_duration() {
        assert_eq!(format_total_duration(45 * 60_000), "45m");
        assert_eq!(format_total_duration(3_600_000 + 5 * 60_000), "1h 5m");
        assert_eq!(format_total_duration(0), "0m");
    }

    #[test]
    fn test_day_label() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 16, 23, 59, 0).unwrap();
        assert_eq!(day_label(day_of(ts)), "Fri Oct 16 2026");
    }

    #[test]
    fn test_generation_id_is_millis() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(generation_id(ts), 1_704_067_200_000);
    }
}
