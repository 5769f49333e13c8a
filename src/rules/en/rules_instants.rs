use super::helpers::{Grain, shift_datetime_by_grain};
use crate::{Error, Rule};

/// "yesterday"
pub fn rule_yesterday() -> Result<Rule, Error> {
    rule! {
        name: "yesterday",
        pattern: r"\byesterday\b",
        time: |ctx, _t, caps| {
            shift_datetime_by_grain(ctx.today, -1, Grain::Day).ok_or_else(|| Error::out_of_range(caps.rule()))
        }
    }
}

/// "tomorrow"
pub fn rule_tomorrow() -> Result<Rule, Error> {
    rule! {
        name: "tomorrow",
        pattern: r"\btomorrow\b",
        time: |ctx, _t, caps| {
            shift_datetime_by_grain(ctx.today, 1, Grain::Day).ok_or_else(|| Error::out_of_range(caps.rule()))
        }
    }
}

/// "today"
pub fn rule_today() -> Result<Rule, Error> {
    rule! {
        name: "today",
        pattern: r"\btoday\b",
        time: |ctx, _t, _caps| {
            Ok(ctx.today)
        }
    }
}
