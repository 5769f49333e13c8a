use super::helpers::normalized_datetime;
use crate::{BucketMask, Error, Rule};
use chrono::{Datelike, Timelike};

/// "at 3pm", "at 15:30", "at 6 am", "at 9.45"
///
/// The minute defaults to the current one when absent. "pm" adds twelve hours
/// to whatever hour was written, and the clock time is laid on top of the
/// current day by plain addition, so "at 12pm" lands on midnight of the next
/// day.
pub fn rule_at_time() -> Result<Rule, Error> {
    rule! {
        name: "at time",
        pattern: r"\bat\s(?P<hour>[0-9]{1,2})(?:[.:,]?(?P<minute>[0-9]{2}))?\s?(?P<meridiem>am|pm)?\b",
        buckets: BucketMask::HAS_DIGITS,
        time: |_ctx, t, caps| {
            let mut hour: i64 = caps.require("hour")?;
            let minute: i64 = caps.parse("minute")?.unwrap_or_else(|| i64::from(t.minute()));
            if caps.get("meridiem") == Some("pm") {
                hour += 12;
            }

            normalized_datetime(t.year(), t.month(), i64::from(t.day()), hour, minute, t.second(), t.nanosecond(), *t.offset())
                .ok_or_else(|| Error::out_of_range(caps.rule()))
        }
    }
}
