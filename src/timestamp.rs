//! Lenient ISO 8601 timestamp parsing
//!
//! twtxt files in the wild are written by hand, by shell one-liners, and by a
//! dozen different clients, so the timestamp column is only *mostly* ISO 8601.
//! This parser accepts the common variations:
//!
//! - surrounding whitespace
//! - `T`, `t` or a space between date and time
//! - basic (`20161225T120000Z`) as well as extended notation
//! - `/` instead of `-` between date fields
//! - hour-only times, missing seconds, fractions with `.` or `,`
//! - date-only values (midnight)
//! - offsets written as `Z`, `z`, `UTC`, `GMT`, `+HH`, `+HHMM` or `+HH:MM`
//!
//! A value without any offset is annotated with UTC. The wall-clock fields are
//! kept as written, they are not converted from local time.

use crate::{Result, TwtxtError};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};

/// Years the parser accepts; anything else is reported as out of range
const YEAR_RANGE: std::ops::RangeInclusive<i64> = 1..=9999;

/// Separators accepted between year, month and day
const DATE_SEPARATORS: [char; 2] = ['-', '/'];

/// Time-of-day layouts with colons, tried in order
const EXTENDED_TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Colon-less ISO 8601 basic layouts, tried in order
const BASIC_TIME_FORMATS: &[&str] = &["%H%M%S%.f", "%H%M%S", "%H%M"];

/// Parses a twtxt timestamp into an offset-aware instant
///
/// # Examples
///
/// ```
/// use twtxt::timestamp::parse_iso8601;
///
/// let dt = parse_iso8601("2016-12-25T12:00:00+01:00").unwrap();
/// assert_eq!(dt.to_rfc3339(), "2016-12-25T12:00:00+01:00");
///
/// // No offset: the same wall clock, annotated with UTC
/// let dt = parse_iso8601("2016-12-25 12:00").unwrap();
/// assert_eq!(dt.to_rfc3339(), "2016-12-25T12:00:00+00:00");
///
/// assert!(parse_iso8601("not-a-date").is_err());
/// ```
///
/// # Errors
///
/// - [`TwtxtError::MalformedTimestamp`] if the string is not a recognizable date/time
/// - [`TwtxtError::TimestampOutOfRange`] if the year falls outside `1..=9999`
pub fn parse_iso8601(raw: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TwtxtError::malformed_timestamp(raw, "empty timestamp"));
    }

    let (date_part, rest) = match trimmed.find(['T', 't', ' ']) {
        Some(pos) => (&trimmed[..pos], Some(&trimmed[pos + 1..])),
        None => (trimmed, None),
    };

    let date = parse_date(raw, date_part)?;

    let (time_part, offset) = match rest {
        Some(rest) => split_offset(raw, rest)?,
        None => (None, None),
    };

    let time = match time_part {
        Some(time_part) => parse_time(raw, time_part)?,
        None => NaiveTime::MIN,
    };

    make_aware(date.and_time(time), offset)
        .ok_or_else(|| TwtxtError::out_of_range(raw, "offset moves the date out of range"))
}

/// Attaches `offset` to a naive date/time, assuming UTC when there is none
///
/// The wall-clock fields are not shifted: a naive `12:00` becomes `12:00+00:00`.
/// Returns `None` only if applying the offset leaves chrono's representable range.
pub fn make_aware(
    naive: NaiveDateTime,
    offset: Option<FixedOffset>,
) -> Option<DateTime<FixedOffset>> {
    let offset = offset.unwrap_or_else(|| Utc.fix());
    naive.and_local_timezone(offset).single()
}

fn parse_date(raw: &str, date: &str) -> Result<NaiveDate> {
    let Some(sep) = date.chars().find(|c| DATE_SEPARATORS.contains(c)) else {
        return parse_basic_date(raw, date);
    };

    // Check the year by hand so oversized years surface as overflow rather
    // than as a generic format error
    let year = date.split(sep).next().unwrap_or_default();
    if !year.is_empty() && year.bytes().all(|b| b.is_ascii_digit()) {
        match year.parse::<i64>() {
            Ok(y) if YEAR_RANGE.contains(&y) => {}
            _ => {
                return Err(TwtxtError::out_of_range(
                    raw,
                    format!("year {} is out of range", year),
                ));
            }
        }
    }

    let layout = format!("%Y{sep}%m{sep}%d");
    NaiveDate::parse_from_str(date, &layout).map_err(|e| {
        TwtxtError::malformed_timestamp(raw, format!("invalid date {:?}: {}", date, e))
    })
}

/// Parses the separator-less `YYYYMMDD` form
fn parse_basic_date(raw: &str, date: &str) -> Result<NaiveDate> {
    let invalid = || TwtxtError::malformed_timestamp(raw, format!("invalid date {:?}", date));

    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let field = |range: std::ops::Range<usize>| date[range].parse::<u32>().map_err(|_| invalid());

    let year = field(0..4)?;
    if !YEAR_RANGE.contains(&i64::from(year)) {
        return Err(TwtxtError::out_of_range(
            raw,
            format!("year {} is out of range", year),
        ));
    }
    let year = i32::try_from(year).map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?).ok_or_else(invalid)
}

fn parse_time(raw: &str, time: &str) -> Result<NaiveTime> {
    // Comma is an ISO 8601 decimal sign too
    let normalized = time.replacen(',', ".", 1);
    let formats = if normalized.contains(':') {
        EXTENDED_TIME_FORMATS
    } else {
        BASIC_TIME_FORMATS
    };

    formats
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
        .or_else(|| parse_hour(&normalized))
        .ok_or_else(|| TwtxtError::malformed_timestamp(raw, format!("invalid time {:?}", time)))
}

/// Hour-only time of day such as `12`; chrono refuses to parse a time without minutes
fn parse_hour(time: &str) -> Option<NaiveTime> {
    if time.is_empty() || time.len() > 2 || !time.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveTime::from_hms_opt(time.parse().ok()?, 0, 0)
}

/// Splits the part after the date separator into time-of-day and offset
fn split_offset<'a>(
    raw: &str,
    rest: &'a str,
) -> Result<(Option<&'a str>, Option<FixedOffset>)> {
    let rest = rest.trim();

    let (time, offset) = if let Some(time) = rest.strip_suffix(['Z', 'z']) {
        (time, Some(Utc.fix()))
    } else if let Some(time) = strip_zone_name(rest) {
        (time, Some(Utc.fix()))
    } else if let Some(pos) = rest.find(['+', '-']) {
        (&rest[..pos], Some(parse_offset(raw, &rest[pos..])?))
    } else {
        (rest, None)
    };

    let time = time.trim_end();
    Ok(((!time.is_empty()).then_some(time), offset))
}

fn strip_zone_name(s: &str) -> Option<&str> {
    let split = s.len().checked_sub(3)?;
    let zone = s.get(split..)?;
    if zone.eq_ignore_ascii_case("UTC") || zone.eq_ignore_ascii_case("GMT") {
        Some(&s[..split])
    } else {
        None
    }
}

/// Parses `+HH`, `+HHMM` or `+HH:MM` (and the `-` forms)
fn parse_offset(raw: &str, s: &str) -> Result<FixedOffset> {
    let invalid = || TwtxtError::malformed_timestamp(raw, format!("invalid offset {:?}", s));

    let sign = if s.starts_with('-') { -1 } else { 1 };
    let body = &s[1..];
    if !body.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return Err(invalid());
    }
    let (hours, minutes) = match body.len() {
        2 => (body, "00"),
        4 => (&body[..2], &body[2..]),
        5 if body.as_bytes()[2] == b':' => (&body[..2], &body[3..]),
        _ => return Err(invalid()),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
