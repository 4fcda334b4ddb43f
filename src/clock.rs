//! Reference time for future-tweet detection

use chrono::{DateTime, Utc};

/// Supplies the current instant
///
/// The parser asks once per batch, so every line of a feed is judged against
/// the same reference time.
pub trait Clock: Send + Sync {
    /// Current time in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant; for deterministic tests and replays
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use twtxt::{Clock, FixedClock};
///
/// let at = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(FixedClock(at).now(), at);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
