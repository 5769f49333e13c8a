//! Reference clock.
//!
//! Every rule that needs "now" or "today" reads it through a [`Clock`] held by
//! the parser. The parser reads its clock exactly once per call (see
//! [`Context::capture`](crate::Context::capture)), so swapping the clock for a
//! [`FixedClock`] makes a parse fully deterministic.

use chrono::{DateTime, FixedOffset, Local, NaiveTime};

/// Source of the current instant.
///
/// Any `Fn() -> DateTime<FixedOffset>` closure is a clock too:
///
/// ```
/// use chrono::DateTime;
/// use tempus::{Clock, start_of_day};
///
/// let pinned = || DateTime::parse_from_rfc3339("2024-03-10T18:45:00+01:00").unwrap();
/// assert_eq!(start_of_day(pinned.now()).to_rfc3339(), "2024-03-10T00:00:00+01:00");
/// ```
///
/// "Today" is always derived from `now` with [`start_of_day`], never read
/// separately, so one parse sees one instant.
pub trait Clock: Send + Sync {
    /// The current instant, with sub-second precision.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The system clock, in the machine's local offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock pinned to a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<FixedOffset> + Send + Sync,
{
    fn now(&self) -> DateTime<FixedOffset> {
        self()
    }
}

/// Truncate `dt` to midnight of its own calendar day, keeping its offset.
pub fn start_of_day(dt: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    dt - dt.time().signed_duration_since(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn today_truncates_to_midnight_in_same_offset() {
        let clock = FixedClock(at("2013-02-12T04:30:15.250+05:30"));
        let today = start_of_day(clock.now());
        assert_eq!(today, at("2013-02-12T00:00:00+05:30"));
        assert_eq!(today.offset(), clock.now().offset());
        assert_eq!(today.nanosecond(), 0);
    }

    #[test]
    fn today_uses_local_calendar_day_not_utc() {
        // 23:30 at -02:00 is already the next day in UTC.
        let clock = FixedClock(at("1999-12-31T23:30:00-02:00"));
        assert_eq!(start_of_day(clock.now()), at("1999-12-31T00:00:00-02:00"));
    }

    #[test]
    fn closures_are_clocks() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let clock = move || utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(start_of_day(clock.now()), at("1970-01-01T00:00:00Z"));
    }

    #[test]
    fn system_clock_today_is_not_after_now() {
        let clock = SystemClock;
        let now = clock.now();
        assert!(start_of_day(now) <= now);
    }
}
