// models/src/timestamps.rs
//
// Instants are stored as UTC. Rendering and manual entry happen in a fixed
// offset supplied by the caller, so output never depends on the host locale.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone, Utc};

use crate::errors::{ValidationError, ValidationResult};

pub type Timestamp = DateTime<Utc>;

/// Read-only rendering, e.g. `05 Jan 2025, 02:30 PM`.
pub const DISPLAY_FORMAT: &str = "%d %b %Y, %I:%M %p";

/// Manual entry layout, e.g. `05/01/25 14:30`.
pub const EDIT_FORMAT: &str = "%d/%m/%y %H:%M";

/// Century added to the two-digit year of a manual entry. Entries stop being
/// representable after 2099.
pub const EDIT_YEAR_CENTURY: i32 = 2000;

/// Gap between a newly added row and the reading before it.
pub const ROW_INTERVAL_MINUTES: i64 = 5;

pub fn format_timestamp(instant: Timestamp, zone: &FixedOffset) -> String {
    instant.with_timezone(zone).format(DISPLAY_FORMAT).to_string()
}

pub fn format_for_edit(instant: Timestamp, zone: &FixedOffset) -> String {
    instant.with_timezone(zone).format(EDIT_FORMAT).to_string()
}

/// Serializes an instant the way the backend stores it: `2025-01-05T14:30:00.000Z`.
pub fn to_iso_string(instant: Timestamp) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_iso(value: &str) -> ValidationResult<Timestamp> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ValidationError::InvalidTimestampFormat(value.to_string()))
}

/// Offsets an instant by `minutes`, which may be negative. Saturates at the
/// representable range instead of overflowing.
pub fn add_minutes(instant: Timestamp, minutes: i64) -> Timestamp {
    TimeDelta::try_minutes(minutes)
        .and_then(|delta| instant.checked_add_signed(delta))
        .unwrap_or(if minutes < 0 { DateTime::<Utc>::MIN_UTC } else { DateTime::<Utc>::MAX_UTC })
}

/// Picks the timestamp for a row being appended: one interval after the last
/// draft, else one interval after the last saved reading, else `now`.
pub fn next_row_timestamp(
    last_draft: Option<Timestamp>,
    last_saved: Option<Timestamp>,
    now: Timestamp,
    interval_minutes: i64,
) -> Timestamp {
    match last_draft.or(last_saved) {
        Some(previous) => add_minutes(previous, interval_minutes),
        None => now,
    }
}

struct EditSegments {
    day: u32,
    month: u32,
    year: i32,
    hour: u32,
    minute: u32,
}

fn number(segment: &str) -> Option<u32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

fn edit_segments(input: &str) -> Option<EditSegments> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let [date, time] = parts.as_slice() else {
        return None;
    };
    let date: Vec<&str> = date.split('/').collect();
    let time: Vec<&str> = time.split(':').collect();
    let ([day, month, year], [hour, minute]) = (date.as_slice(), time.as_slice()) else {
        return None;
    };
    if year.len() > 2 {
        return None;
    }
    Some(EditSegments {
        day: number(day)?,
        month: number(month)?,
        year: EDIT_YEAR_CENTURY + i32::try_from(number(year)?).ok()?,
        hour: number(hour)?,
        minute: number(minute)?,
    })
}

/// Parses a manually entered timestamp in `zone`.
///
/// `DD/MM/YY HH:MM` (24-hour) is the entry format. The display format is
/// accepted too, so an untouched edit buffer still parses.
pub fn parse_manual_timestamp(input: &str, zone: &FixedOffset) -> ValidationResult<Timestamp> {
    let trimmed = input.trim();
    let naive = match edit_segments(trimmed) {
        Some(s) => NaiveDate::from_ymd_opt(s.year, s.month, s.day)
            .and_then(|date| date.and_hms_opt(s.hour, s.minute, 0))
            .ok_or_else(|| ValidationError::InvalidDate(input.to_string()))?,
        None => NaiveDateTime::parse_from_str(trimmed, DISPLAY_FORMAT)
            .map_err(|_| ValidationError::InvalidTimestampFormat(input.to_string()))?,
    };
    zone.from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ValidationError::InvalidDate(input.to_string()))
}
