//! Human-readable durations for diagnostics
//!
//! Used to describe how far in the future a misdated tweet is, e.g.
//! `"3 days from now"`.

use chrono::TimeDelta;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;
const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: f64 = 30.5;

/// Describes the magnitude of `delta` in words, ignoring its sign
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use twtxt::humanize::natural_delta;
///
/// assert_eq!(natural_delta(TimeDelta::seconds(0)), "a moment");
/// assert_eq!(natural_delta(TimeDelta::minutes(-5)), "5 minutes");
/// assert_eq!(natural_delta(TimeDelta::days(3)), "3 days");
/// assert_eq!(natural_delta(TimeDelta::days(400)), "1 year, 1 month");
/// ```
pub fn natural_delta(delta: TimeDelta) -> String {
    let total = delta.num_seconds().abs();
    let days = total / SECS_PER_DAY;
    let seconds = total % SECS_PER_DAY;
    let years = days / DAYS_PER_YEAR;
    let days = days % DAYS_PER_YEAR;
    let months = (days as f64 / DAYS_PER_MONTH).round() as i64;

    match years {
        0 => match days {
            0 => describe_seconds(seconds),
            1 => "a day".to_string(),
            _ => match months {
                0 => format!("{} days", days),
                1 => "a month".to_string(),
                n => format!("{} months", n),
            },
        },
        1 => match (months, days) {
            (_, 0) => "a year".to_string(),
            (0, 1) => "1 year, 1 day".to_string(),
            (0, d) => format!("1 year, {} days", d),
            (1, _) => "1 year, 1 month".to_string(),
            (m, _) => format!("1 year, {} months", m),
        },
        n => format!("{} years", n),
    }
}

fn describe_seconds(seconds: i64) -> String {
    match seconds {
        0 => "a moment".to_string(),
        1 => "a second".to_string(),
        s if s < SECS_PER_MINUTE => format!("{} seconds", s),
        s if s < 2 * SECS_PER_MINUTE => "a minute".to_string(),
        s if s < SECS_PER_HOUR => format!("{} minutes", s / SECS_PER_MINUTE),
        s if s < 2 * SECS_PER_HOUR => "an hour".to_string(),
        s => format!("{} hours", s / SECS_PER_HOUR),
    }
}
