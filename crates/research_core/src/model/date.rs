//! Date parsing and derived date values.
//!
//! Stored dates are strings. Bare `YYYY-MM-DD` values are calendar dates in
//! the local time zone; full timestamps keep their own offset and are
//! converted to local time before any day arithmetic.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A successfully parsed stored date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    /// `YYYY-MM-DD` without time of day.
    Calendar(NaiveDate),
    /// Timestamp with a known offset.
    Instant(DateTime<FixedOffset>),
    /// Timestamp without offset, read as local wall-clock time.
    LocalDateTime(NaiveDateTime),
}

impl ParsedDate {
    /// Local wall-clock representation used for day arithmetic and display.
    pub fn to_local_naive(self) -> NaiveDateTime {
        match self {
            Self::Calendar(date) => date.and_time(chrono::NaiveTime::MIN),
            Self::Instant(instant) => instant.with_timezone(&Local).naive_local(),
            Self::LocalDateTime(value) => value,
        }
    }
}

/// Parses a stored date string. Returns `None` for empty or unrecognized
/// input.
pub fn parse_date(value: &str) -> Option<ParsedDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(ParsedDate::Calendar(date));
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ParsedDate::Instant(instant));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(ParsedDate::LocalDateTime)
}

/// Today's date in the local time zone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole days from local midnight today until `date`, rounded up.
///
/// `None` when `date` is absent or unparseable. Today's date yields `0`,
/// past dates are negative.
pub fn days_until(date: Option<&str>) -> Option<i64> {
    days_until_on(date, local_today())
}

/// Same as [`days_until`] with an explicit "today".
pub fn days_until_on(date: Option<&str>, today: NaiveDate) -> Option<i64> {
    let target = parse_date(date?)?.to_local_naive();
    let midnight = today.and_time(chrono::NaiveTime::MIN);
    let diff_ms = (target - midnight).num_milliseconds();
    let whole = diff_ms.div_euclid(MILLIS_PER_DAY);
    if diff_ms.rem_euclid(MILLIS_PER_DAY) > 0 {
        Some(whole + 1)
    } else {
        Some(whole)
    }
}

/// Display label such as `Mar 5, 2025`.
///
/// Empty input gives an empty label; unparseable input is returned as-is.
pub fn format_date(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match parse_date(value) {
        Some(parsed) => parsed.to_local_naive().format("%b %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// `YYYY-MM-DD` value used to prefill date inputs on edit forms.
///
/// Timestamps are reduced to their UTC calendar date; unparseable input
/// yields an empty string.
pub fn date_input_value(value: &str) -> String {
    match parse_date(value) {
        Some(ParsedDate::Calendar(date)) => date.format("%Y-%m-%d").to_string(),
        Some(ParsedDate::Instant(instant)) => instant
            .with_timezone(&Utc)
            .date_naive()
            .format("%Y-%m-%d")
            .to_string(),
        Some(ParsedDate::LocalDateTime(value)) => Local
            .from_local_datetime(&value)
            .earliest()
            .map(|local| local.with_timezone(&Utc).date_naive())
            .unwrap_or_else(|| value.date())
            .format("%Y-%m-%d")
            .to_string(),
        None => String::new(),
    }
}
