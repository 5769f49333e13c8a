use crate::timezone;
use crate::{BucketMask, Error, Rule};
use chrono::TimeZone;

/// "at 3pm PST", "tomorrow at 9 CET"
///
/// Reads the wall-clock time built so far as a time in the named zone.
/// The code must be upper-case and must directly follow an "at" time, so
/// "EAT LUNCH" or "ART CLASS" are left alone. The match overlaps the
/// "at time" span; the residual drops both once.
pub fn rule_timezone() -> Result<Rule, Error> {
    rule! {
        name: "timezone",
        pattern: format!(
            r"\b[aA][tT]\s[0-9]{{1,2}}(?:[.:,]?[0-9]{{2}})?\s?(?:[aApP][mM])?\s?(?P<tz>{})\b",
            timezone::pattern()
        ),
        case_insensitive: false,
        buckets: BucketMask::HAS_DIGITS | BucketMask::HAS_UPPERCASE,
        time: |_ctx, t, caps| {
            let tz = timezone::lookup(caps.text("tz"))?;
            let local = t.naive_local();

            tz.from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.fixed_offset())
                .ok_or_else(|| Error::NonexistentLocalTime { time: local, zone: tz.name().to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_must_follow_an_at_time() {
        let rule = rule_timezone().unwrap();
        let re = rule.pattern();

        assert_eq!(&re.captures("call at 3pm PST").unwrap()["tz"], "PST");
        assert_eq!(&re.captures("sync AT 9 JST tomorrow").unwrap()["tz"], "JST");
        assert_eq!(&re.captures("at 9:30 GMT+10").unwrap()["tz"], "GMT+10");

        assert!(!re.is_match("EAT LUNCH AT 5"));
        assert!(!re.is_match("ART CLASS AT 5"));
        assert!(!re.is_match("WEST WING AT 5"));
        assert!(!re.is_match("at 3pm pst"));
    }
}
