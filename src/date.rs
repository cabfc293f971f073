//! Timestamp normalization to an approximate Jalali form.
//!
//! Post dates arrive as `M/D/YYYY h:mm:ss AM/PM` in Tehran local time. The
//! year is shifted to the Solar Hijri era with a fixed March 21 cutoff while
//! month and day stay Gregorian. This is an approximation, not a calendar
//! conversion; the year offsets are the empirically chosen ones.

use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, TimeZone, Timelike};
use serde::{Serialize, Serializer};

/// Marker prefixed to every normalized date.
pub const CALENDAR_MARKER: &str = "jalali";

/// Source pattern, e.g. `7/4/2023 8:02:48 AM`.
pub const SOURCE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Name of the fixed source timezone.
pub const SOURCE_TIMEZONE: &str = "Asia/Tehran";

/// UTC offset of [`SOURCE_TIMEZONE`] (+03:30, no DST).
const SOURCE_OFFSET_SECS: i32 = 3 * 3600 + 30 * 60;

/// Month/day from which the larger year offset applies.
const YEAR_SHIFT_BOUNDARY: (u32, u32) = (3, 21);
const OFFSET_BEFORE_BOUNDARY: i32 = 621;
const OFFSET_FROM_BOUNDARY: i32 = 620;

/// Date fields after the year shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JalaliStamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

/// Result of [`normalize`]. Both variants display with the calendar marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedDate {
    Parsed(JalaliStamp),
    /// The input did not match [`SOURCE_FORMAT`] and is echoed unchanged.
    Unparsed(String),
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(s) => write!(
                f,
                "{CALENDAR_MARKER}:{:04}/{:02}/{:02}/{:02}:{:02}",
                s.year, s.month, s.day, s.hour, s.minute
            ),
            Self::Unparsed(raw) => write!(f, "{CALENDAR_MARKER}:{raw}"),
        }
    }
}

impl Serialize for NormalizedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse `raw` against [`SOURCE_FORMAT`] as Tehran local time.
#[must_use]
pub fn parse_source(raw: &str) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), SOURCE_FORMAT).ok()?;
    let tz = FixedOffset::east_opt(SOURCE_OFFSET_SECS)?;
    tz.from_local_datetime(&naive).single()
}

/// Apply the year shift to a local date-time.
#[must_use]
pub fn to_jalali<T: Datelike + Timelike>(dt: &T) -> JalaliStamp {
    let (month, day) = (dt.month(), dt.day());
    let offset = if (month, day) < YEAR_SHIFT_BOUNDARY {
        OFFSET_BEFORE_BOUNDARY
    } else {
        OFFSET_FROM_BOUNDARY
    };
    JalaliStamp {
        year: dt.year() - offset,
        month,
        day,
        hour: dt.hour(),
        minute: dt.minute(),
    }
}

/// Normalize a source timestamp. Never fails: unparsable input is echoed.
#[must_use]
pub fn normalize(raw: &str) -> NormalizedDate {
    match parse_source(raw) {
        Some(dt) => NormalizedDate::Parsed(to_jalali(&dt)),
        None => NormalizedDate::Unparsed(raw.to_string()),
    }
}

/// Normalize a local timestamp that is already parsed (e.g. the scrape time).
#[must_use]
pub fn normalize_local(dt: &NaiveDateTime) -> NormalizedDate {
    NormalizedDate::Parsed(to_jalali(dt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_pattern() {
        assert_eq!(normalize("7/4/2023 8:02:48 AM").to_string(), "jalali:1403/07/04/08:02");
        assert_eq!(normalize("12/31/2022 11:59:59 PM").to_string(), "jalali:1402/12/31/23:59");
    }

    #[test]
    fn year_shift_boundary() {
        assert_eq!(normalize("3/20/2024 1:00:00 AM").to_string(), "jalali:1403/03/20/01:00");
        assert_eq!(normalize("3/21/2024 1:00:00 AM").to_string(), "jalali:1404/03/21/01:00");
    }

    #[test]
    fn parsed_value_carries_tehran_offset() {
        let Some(dt) = parse_source("1/2/2024 3:04:05 PM") else { panic!("expected a parse") };
        assert_eq!(dt.offset().local_minus_utc(), 12_600);
    }

    #[test]
    fn garbage_falls_back_to_raw() {
        let normalized = normalize("garbage");
        assert_eq!(normalized, NormalizedDate::Unparsed("garbage".to_string()));
        let text = normalized.to_string();
        assert!(text.contains("garbage"));
        assert!(text.starts_with("jalali:"));
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(normalize("").to_string(), "jalali:");
    }

    #[test]
    fn serializes_as_display_string() {
        let json = serde_json::to_string(&normalize("bad date"));
        assert_eq!(json.ok().as_deref(), Some("\"jalali:bad date\""));
    }
}
