use chrono::{DateTime, NaiveDate, Utc, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Seconds between the Unix epoch and the Cocoa reference date (2001-01-01T00:00:00Z).
const COCOA_EPOCH_UNIX: i64 = 978_307_200;

/// Seconds between 0001-01-01T00:00:00Z and the Unix epoch.
const ZERO_TIME_UNIX: i64 = -62_135_596_800;

/// Timestamp layout used by every date in the Day One export.
pub const DAY_ONE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Date formats accepted in an entry's page header, tried in order.
///
/// Formats starting with `%A, ` carry a weekday name which is recognized but not checked
/// against the date that follows it.
const PAGE_HEADER_FORMATS: &[&str] = &["%A, %-d %B %Y", "%A, %d %B %Y", "%-d %B %Y", "%d %B %Y"];
const WEEKDAY_PREFIX: &str = "%A, ";

static FILE_NAME_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})_").expect("valid file name date regex"));

/// The Cocoa reference date, 2001-01-01T00:00:00Z.
pub fn cocoa_epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(COCOA_EPOCH_UNIX, 0).unwrap_or_default()
}

/// The "no date found" value, 0001-01-01T00:00:00Z.
pub fn zero_time() -> DateTime<Utc> {
    DateTime::from_timestamp(ZERO_TIME_UNIX, 0).unwrap_or_default()
}

/// Converts seconds since the Cocoa reference date into an absolute UTC instant.
///
/// Sub-microsecond precision is dropped. Offsets outside chrono's range saturate to
/// [`DateTime::MIN_UTC`] / [`DateTime::MAX_UTC`]; `NaN` maps to the reference date itself.
pub fn cocoa_timestamp_to_utc(seconds: f64) -> DateTime<Utc> {
    if seconds.is_nan() {
        return cocoa_epoch();
    }
    let micros = ((seconds + COCOA_EPOCH_UNIX as f64) * 1_000_000.0).round();
    match DateTime::from_timestamp_micros(micros as i64) {
        Some(date) => date,
        None if micros < 0.0 => DateTime::<Utc>::MIN_UTC,
        None => DateTime::<Utc>::MAX_UTC,
    }
}

/// Parses the date shown in an entry's page header (e.g. `Monday, 15 December 2025`).
///
/// Returns midnight UTC of that day, or `None` when no known format matches.
pub fn parse_page_header_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    PAGE_HEADER_FORMATS
        .iter()
        .find_map(|format| parse_with_format(text, format))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

fn parse_with_format(text: &str, format: &str) -> Option<NaiveDate> {
    match format.strip_prefix(WEEKDAY_PREFIX) {
        Some(date_format) => {
            let (weekday, rest) = text.split_once(", ")?;
            weekday.trim().parse::<Weekday>().ok()?;
            NaiveDate::parse_from_str(rest.trim(), date_format).ok()
        }
        None => NaiveDate::parse_from_str(text, format).ok(),
    }
}

/// Recovers a date from a leading `YYYY-MM-DD_` in the document's file name.
pub fn date_from_file_name(path: &Path) -> Option<DateTime<Utc>> {
    let name = path.file_name()?.to_str()?;
    let captures = FILE_NAME_DATE.captures(name)?;
    NaiveDate::parse_from_str(&captures[1], "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|date| date.and_utc())
}

/// `2025-12-15T00:00:00Z`
pub fn format_day_one_date(date: DateTime<Utc>) -> String {
    date.format(DAY_ONE_DATE_FORMAT).to_string()
}
