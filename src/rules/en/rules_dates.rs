use super::helpers::{month_from_name, normalized_datetime};
use crate::{BucketMask, Error, Rule};
use chrono::{Datelike, Timelike};

/// "on oct 26, 1985", "26 oct 1985", "december 3", "on 5 may"
///
/// The day may come before or after the month; when both are written the one
/// after wins. Parts that are not written keep their current value, and a
/// day past the end of the month rolls into the next. Matching is ASCII-only
/// so it agrees with the month-prefix bucket scan.
pub fn rule_date() -> Result<Rule, Error> {
    rule! {
        name: "date",
        pattern: concat!(
            r"\b(?:on\s?)?(?:(?P<day>[0-9]{1,2})\s?)?",
            r"(?P<month>jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?",
            r"|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b",
            r"(?:\s(?P<day_after>[0-9]{1,2})\b)?",
            r"(?:[,\s]+(?P<year>[0-9]{4})\b)?",
        ),
        unicode: false,
        buckets: BucketMask::MONTHISH,
        time: |_ctx, t, caps| {
            let month_name = caps.text("month");
            let month = month_from_name(month_name)
                .ok_or_else(|| Error::capture(caps.rule(), "month", month_name, "unknown month"))?;

            let day = match caps.parse::<i64>("day_after")? {
                Some(day) => day,
                None => caps.parse::<i64>("day")?.unwrap_or_else(|| i64::from(t.day())),
            };
            let year = caps.parse::<i32>("year")?.unwrap_or_else(|| t.year());

            normalized_datetime(
                year,
                month,
                day,
                i64::from(t.hour()),
                i64::from(t.minute()),
                t.second(),
                t.nanosecond(),
                *t.offset(),
            )
            .ok_or_else(|| Error::out_of_range(caps.rule()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_match_ascii_only() {
        let rule = rule_date().unwrap();
        assert!(rule.pattern().is_match("party SEP 5"));
        assert!(!rule.pattern().is_match("party \u{17f}ep 5"));
    }
}
