use super::helpers::{amount_capture, grain_capture, scaled};
use crate::{BucketMask, Error, Rule};

/// "for 2 hours", "for 30 min", "for 1.5h", "for 2 days"
///
/// Adds to the running duration, so several phrases in one input sum up.
pub fn rule_duration() -> Result<Rule, Error> {
    rule! {
        name: "duration",
        pattern: r"\bfor\s(?P<amount>[0-9.]+)\s?(?P<unit>s(?:ec(?:ond)?s?)?|m(?:in(?:ute)?s?)?|h(?:(?:ou)?rs?)?|d(?:ays?)?)\b",
        buckets: BucketMask::HAS_DIGITS,
        duration: |d, caps| {
            let amount = amount_capture(caps, "amount")?;
            let grain = grain_capture(caps, "unit")?;

            grain
                .fixed_length()
                .and_then(|unit| scaled(amount, unit))
                .and_then(|extra| d.checked_add(&extra))
                .ok_or_else(|| Error::out_of_range(caps.rule()))
        }
    }
}
