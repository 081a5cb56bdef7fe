//! ISO-8601 timestamps with offset.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Timelike};
use serde_json::Value;

use crate::errors::ModelError;

pub type Timestamp = DateTime<FixedOffset>;

/// Wire precision is 100ns; finer digits would not survive rendering.
const TICK_NANOS: u32 = 100;

/// Current local time, keeping the local offset, at wire precision.
pub fn now() -> Timestamp { to_wire_precision(Local::now().fixed_offset()) }

/// Truncate to the 100ns resolution the wire format carries.
pub fn to_wire_precision(ts: Timestamp) -> Timestamp {
    let nanos = ts.nanosecond();
    ts.with_nanosecond(nanos - nanos % TICK_NANOS).unwrap_or(ts)
}

/// Round-trip rendering, e.g. `2010-04-14T06:37:38.0000000-04:00`: seven
/// fractional digits, offset always `+hh:mm`.
pub fn format_iso8601(ts: &Timestamp) -> String {
    format!(
        "{}.{:07}{}",
        ts.format("%Y-%m-%dT%H:%M:%S"),
        ts.nanosecond() / TICK_NANOS,
        ts.format("%:z")
    )
}

pub fn parse_iso8601(field: &str, raw: &str) -> Result<Timestamp, ModelError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(to_wire_precision)
        .map_err(|e| ModelError::format(field, format!("invalid ISO-8601 timestamp `{raw}`: {e}")))
}

/// Wire value for an optional timestamp; absent renders as `null`.
pub fn encode_optional(ts: Option<&Timestamp>) -> Value {
    ts.map_or(Value::Null, |t| Value::String(format_iso8601(t)))
}

const LOCAL_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Accepts a calendar date, or a date-time with minute or second precision,
/// optional fraction, and an optional `Z`, `+hh:mm`, `+hhmm` or `+hh` zone.
pub fn is_iso8601_date_or_datetime(raw: &str) -> bool {
    if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(raw).is_ok() {
        return true;
    }
    let (local, zone) = split_zone(raw);
    zone_is_valid(zone)
        && LOCAL_DATETIME_FORMATS.iter().any(|f| NaiveDateTime::parse_from_str(local, f).is_ok())
}

/// Split `2024-02-29T13:05+05:00` into the local part and its zone suffix.
fn split_zone(raw: &str) -> (&str, &str) {
    let Some(t) = raw.find('T') else { return (raw, "") };
    match raw[t..].find(['Z', '+', '-']) {
        Some(i) => raw.split_at(t + i),
        None => (raw, ""),
    }
}

fn zone_is_valid(zone: &str) -> bool {
    if zone.is_empty() || zone == "Z" {
        return true;
    }
    let Some(offset) = zone.strip_prefix(['+', '-']) else { return false };
    let digits: String = offset.chars().filter(|c| *c != ':').collect();
    let well_formed = match offset.len() {
        2 | 4 => digits.len() == offset.len(),
        5 => offset.as_bytes()[2] == b':' && digits.len() == 4,
        _ => false,
    };
    well_formed
        && digits.bytes().all(|b| b.is_ascii_digit())
        && digits[..2].parse::<u32>().is_ok_and(|h| h <= 23)
        && digits.get(2..).map_or(true, |m| m.is_empty() || m.parse::<u32>().is_ok_and(|m| m <= 59))
}
