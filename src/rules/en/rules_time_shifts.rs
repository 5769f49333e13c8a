use super::helpers::{Grain, amount_capture, grain_capture, shift_datetime_by_amount};
use crate::{BucketMask, Error, Rule};

/// "in 2 days", "in 2.5 minutes", "in 3 weeks", "in 1 year"
///
/// Shifts the running time. Months and years only take whole amounts.
pub fn rule_in_offset() -> Result<Rule, Error> {
    rule! {
        name: "in offset",
        pattern: concat!(
            r"\bin\s(?P<amount>[0-9.]+)\s?",
            r"(?P<unit>s(?:ec(?:ond)?s?)?|m(?:in(?:ute)?s?)?|h(?:(?:ou)?rs?)?|d(?:ays?)?|w(?:(?:ee)?ks?)?",
            r"|mo(?:nths?)?|y(?:(?:ea)?rs?)?)\b",
        ),
        buckets: BucketMask::HAS_DIGITS,
        time: |_ctx, t, caps| {
            let amount = amount_capture(caps, "amount")?;
            let grain = grain_capture(caps, "unit")?;

            if matches!(grain, Grain::Month | Grain::Year) && amount.fract() != 0.0 {
                return Err(Error::capture(caps.rule(), "amount", caps.text("amount"), "months and years must be whole"));
            }

            shift_datetime_by_amount(t, amount, grain).ok_or_else(|| Error::out_of_range(caps.rule()))
        }
    }
}
