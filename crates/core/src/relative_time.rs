//! "Last played" as a human phrase: "minutes ago", "3 days ago", ...

use std::fmt;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

use crate::error::TimestampError;

const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: f64 = 86_400_000.0;

/// Format of the exact timestamp shown next to the phrase
pub const EXACT_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Elapsed-time bucket. Magnitudes are rounded half away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTimeBucket {
    Future,
    WithinHour,
    OneHour,
    Hours(u32),
    OneDay,
    Days(u32),
    OneMonth,
    Months(u32),
    OneYear,
    Years(u32),
}

impl RelativeTimeBucket {
    /// Bucket for `event` as seen from `now`.
    ///
    /// Rules are checked finest unit first and every threshold is a strict `<`,
    /// so exactly 2.0 days lands in `Days(2)`, not `OneDay`.
    pub fn between(now: NaiveDateTime, event: NaiveDateTime) -> Self {
        if event > now {
            return RelativeTimeBucket::Future;
        }
        let elapsed_ms = (now - event).num_milliseconds() as f64;

        let hours = elapsed_ms / MS_PER_HOUR;
        if hours < 1.0 {
            return RelativeTimeBucket::WithinHour;
        }
        if hours < 2.0 {
            return RelativeTimeBucket::OneHour;
        }
        let days = elapsed_ms / MS_PER_DAY;
        if days < 1.0 {
            return RelativeTimeBucket::Hours(round(hours));
        }
        if days < 2.0 {
            return RelativeTimeBucket::OneDay;
        }
        let months = calendar_months_between(event, now, 1);
        if months < 1.0 {
            return RelativeTimeBucket::Days(round(days));
        }
        if months < 2.0 {
            return RelativeTimeBucket::OneMonth;
        }
        let years = calendar_months_between(event, now, 12);
        if years < 1.0 {
            return RelativeTimeBucket::Months(round(months));
        }
        if years < 2.0 {
            return RelativeTimeBucket::OneYear;
        }
        RelativeTimeBucket::Years(round(years))
    }
}

impl fmt::Display for RelativeTimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelativeTimeBucket::Future => f.write_str("in the future"),
            RelativeTimeBucket::WithinHour => f.write_str("minutes ago"),
            RelativeTimeBucket::OneHour => f.write_str("an hour ago"),
            RelativeTimeBucket::Hours(n) => write!(f, "{} hours ago", n),
            RelativeTimeBucket::OneDay => f.write_str("a day ago"),
            RelativeTimeBucket::Days(n) => write!(f, "{} days ago", n),
            RelativeTimeBucket::OneMonth => f.write_str("a month ago"),
            RelativeTimeBucket::Months(n) => write!(f, "{} months ago", n),
            RelativeTimeBucket::OneYear => f.write_str("a year ago"),
            RelativeTimeBucket::Years(n) => write!(f, "{} years ago", n),
        }
    }
}

/// A formatted "last played" cell: the phrase plus the exact time for the tooltip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeTime {
    pub bucket: RelativeTimeBucket,
    pub exact: String,
}

impl RelativeTime {
    pub fn phrase(&self) -> String {
        self.bucket.to_string()
    }
}

/// Format `event` relative to `now`. Returns `None` for a game never played.
pub fn format_relative(now: NaiveDateTime, event: Option<NaiveDateTime>) -> Option<RelativeTime> {
    let event = event?;
    Some(RelativeTime {
        bucket: RelativeTimeBucket::between(now, event),
        exact: event.format(EXACT_FORMAT).to_string(),
    })
}

/// Parse an SQL-style local timestamp (`2021-03-05 19:22:11`, `T` separator,
/// optional seconds and fraction, or a bare date meaning midnight)
pub fn parse_sql_timestamp(value: &str) -> Result<NaiveDateTime, TimestampError> {
    let value = value.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| TimestampError::Invalid(value.to_string()))
}

/// Elapsed time from `start` to `end` (`start <= end`) in calendar spans of
/// `step` months: whole spans counted from `start`, plus the elapsed fraction
/// of the span in progress.
fn calendar_months_between(start: NaiveDateTime, end: NaiveDateTime, step: u32) -> f64 {
    let add = |n: u32| start.checked_add_months(Months::new(n));

    let month_diff = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let mut whole_months = month_diff.max(0) as u32;
    while whole_months > 0 && add(whole_months).map_or(true, |t| t > end) {
        whole_months -= 1;
    }

    let whole = whole_months / step;
    let (Some(anchor), Some(next)) = (add(whole * step), add((whole + 1) * step)) else {
        return whole as f64;
    };
    let span = (next - anchor).num_milliseconds() as f64;
    let into = (end - anchor).num_milliseconds() as f64;
    whole as f64 + into / span
}

fn round(value: f64) -> u32 {
    value.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        parse_sql_timestamp(s).unwrap()
    }

    fn phrase(event: &str) -> String {
        format_relative(ts("2024-01-02 12:00:00"), Some(ts(event))).unwrap().phrase()
    }

    #[test]
    fn test_never_played() {
        assert_eq!(format_relative(ts("2024-01-02 12:00:00"), None), None);
    }

    #[test]
    fn test_reference_boundaries() {
        assert_eq!(phrase("2024-01-02 12:00:01"), "in the future");
        assert_eq!(phrase("2024-01-02 11:30:00"), "minutes ago");
        assert_eq!(phrase("2024-01-02 10:30:00"), "an hour ago");
        assert_eq!(phrase("2024-01-02 06:00:00"), "6 hours ago");
        assert_eq!(phrase("2023-12-31 12:00:00"), "2 days ago");
        assert_eq!(phrase("2022-01-02 12:00:00"), "2 years ago");
    }

    #[test]
    fn test_exact_thresholds_fall_into_coarser_bucket() {
        assert_eq!(phrase("2024-01-02 12:00:00"), "minutes ago");
        assert_eq!(phrase("2024-01-02 11:00:00"), "an hour ago");
        assert_eq!(phrase("2024-01-02 10:00:00"), "2 hours ago");
        assert_eq!(phrase("2024-01-01 12:00:00"), "a day ago");
        assert_eq!(phrase("2023-12-02 12:00:00"), "a month ago");
        assert_eq!(phrase("2023-11-02 12:00:00"), "2 months ago");
        assert_eq!(phrase("2023-01-02 12:00:00"), "a year ago");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // 23.5 hours
        assert_eq!(phrase("2024-01-01 12:30:00"), "24 hours ago");
        // 2.5 days
        assert_eq!(phrase("2023-12-31 00:00:00"), "3 days ago");
        // 2.4 days
        assert_eq!(phrase("2023-12-31 02:24:00"), "2 days ago");
    }

    #[test]
    fn test_months_follow_the_calendar() {
        // 30 days back is still short of the 31-day December span
        assert_eq!(phrase("2023-12-03 12:00:00"), "30 days ago");
        // 5 calendar months
        assert_eq!(phrase("2023-08-02 12:00:00"), "5 months ago");
        // months between 11.5 and 12 round up
        assert_eq!(phrase("2023-01-10 12:00:00"), "12 months ago");
    }

    #[test]
    fn test_calendar_fraction_clamps_month_ends() {
        let start = ts("2024-01-31 00:00:00");
        // Jan 31 + 1 month clamps to Feb 29
        assert_eq!(calendar_months_between(start, ts("2024-02-29 00:00:00"), 1), 1.0);
        assert!(calendar_months_between(start, ts("2024-02-28 00:00:00"), 1) < 1.0);
        let leap = ts("2020-02-29 00:00:00");
        assert_eq!(calendar_months_between(leap, ts("2021-02-28 00:00:00"), 12), 1.0);
    }

    #[test]
    fn test_exact_timestamp_format() {
        let formatted = format_relative(ts("2024-01-02 12:00:00"), Some(ts("2023-03-05 07:08:09"))).unwrap();
        assert_eq!(formatted.exact, "05.03.2023 07:08");
        assert_eq!(formatted.bucket, RelativeTimeBucket::Months(10));
    }

    #[test]
    fn test_parse_sql_timestamp_variants() {
        assert_eq!(ts("2021-03-05 19:22"), ts("2021-03-05 19:22:00"));
        assert_eq!(ts("2021-03-05T19:22:11"), ts("2021-03-05 19:22:11"));
        assert_eq!(ts("2021-03-05"), ts("2021-03-05 00:00:00"));
        assert!(parse_sql_timestamp("2021-03-05 19:22:11.250").is_ok());
        assert!(parse_sql_timestamp("yesterday").is_err());
        assert!(parse_sql_timestamp("").is_err());
    }
}
