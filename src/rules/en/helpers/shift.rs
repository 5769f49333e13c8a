use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime};

/// Calendar unit named by a duration or offset phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grain {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Grain {
    /// Map a (lowercased) unit word to its grain: `"hrs"` -> `Hour`, `"mo"` -> `Month`.
    pub fn from_unit(unit: &str) -> Option<Grain> {
        if unit.starts_with("mo") {
            return Some(Grain::Month);
        }
        match unit.chars().next()? {
            's' => Some(Grain::Second),
            'm' => Some(Grain::Minute),
            'h' => Some(Grain::Hour),
            'd' => Some(Grain::Day),
            'w' => Some(Grain::Week),
            'y' => Some(Grain::Year),
            _ => None,
        }
    }

    /// Exact length of one unit, for grains that have one.
    pub fn fixed_length(self) -> Option<Duration> {
        match self {
            Grain::Second => Some(Duration::seconds(1)),
            Grain::Minute => Some(Duration::minutes(1)),
            Grain::Hour => Some(Duration::hours(1)),
            Grain::Day => Some(Duration::days(1)),
            Grain::Week => Some(Duration::weeks(1)),
            Grain::Month | Grain::Year => None,
        }
    }
}

/// `amount` units of `unit`, truncated to the nanosecond.
///
/// `None` if the product is not finite or does not fit a `Duration`.
pub fn scaled(amount: f64, unit: Duration) -> Option<Duration> {
    let nanos = amount * unit.num_nanoseconds()? as f64;
    if !nanos.is_finite() || nanos.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(Duration::nanoseconds(nanos as i64))
}

/// Shift `dt` by a whole number of units.
///
/// Months and years keep the day of month and let any excess roll into the
/// following month (Jan 31 + 1 month = Mar 3 in a common year).
pub fn shift_datetime_by_grain(dt: DateTime<FixedOffset>, amount: i64, grain: Grain) -> Option<DateTime<FixedOffset>> {
    match grain {
        Grain::Month => add_months(dt, amount),
        Grain::Year => add_months(dt, amount.checked_mul(12)?),
        _ => dt.checked_add_signed(grain.fixed_length()?.checked_mul(i32::try_from(amount).ok()?)?),
    }
}

/// Shift `dt` by a possibly fractional amount.
///
/// Whole units go through [`shift_datetime_by_grain`]; the remainder is added
/// as fixed time. Months and years have no fixed length, so a fractional
/// amount for them is `None`.
pub fn shift_datetime_by_amount(dt: DateTime<FixedOffset>, amount: f64, grain: Grain) -> Option<DateTime<FixedOffset>> {
    match grain {
        Grain::Second | Grain::Minute | Grain::Hour => dt.checked_add_signed(scaled(amount, grain.fixed_length()?)?),
        Grain::Day | Grain::Week => {
            let whole = amount.trunc();
            let shifted = shift_datetime_by_grain(dt, whole_units(whole)?, grain)?;
            shifted.checked_add_signed(scaled(amount - whole, grain.fixed_length()?)?)
        }
        Grain::Month | Grain::Year => {
            if amount.fract() != 0.0 {
                return None;
            }
            shift_datetime_by_grain(dt, whole_units(amount)?, grain)
        }
    }
}

fn whole_units(amount: f64) -> Option<i64> {
    if amount.is_finite() && amount.abs() < i32::MAX as f64 { Some(amount as i64) } else { None }
}

fn add_months(dt: DateTime<FixedOffset>, months: i64) -> Option<DateTime<FixedOffset>> {
    let zero_based = i64::from(dt.year()) * 12 + i64::from(dt.month0()) + months;
    let year = i32::try_from(zero_based.div_euclid(12)).ok()?;
    let month = zero_based.rem_euclid(12) as u32 + 1;
    normalized_date(year, month, i64::from(dt.day()))?
        .and_time(dt.time())
        .and_local_timezone(*dt.offset())
        .single()
}

/// The date `day - 1` days after the first of `year`-`month`.
///
/// Out-of-range days roll over instead of failing: day 32 of October is
/// November 1st, day 0 is the last day of the previous month.
pub fn normalized_date(year: i32, month: u32, day: i64) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = Duration::try_days(day.checked_sub(1)?)?;
    first.checked_add_signed(offset)
}

/// Build a datetime from calendar fields, normalizing overflow in every field
/// below the month the way calendar arithmetic does.
///
/// `hour = 24` is midnight of the next day; `minute = 75` is 1h15m past the hour.
#[allow(clippy::too_many_arguments)]
pub fn normalized_datetime(
    year: i32,
    month: u32,
    day: i64,
    hour: i64,
    minute: i64,
    second: u32,
    nanosecond: u32,
    offset: FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    let midnight = normalized_date(year, month, day)?.and_time(NaiveTime::MIN);
    let clock = Duration::try_hours(hour)?
        .checked_add(&Duration::try_minutes(minute)?)?
        .checked_add(&Duration::seconds(i64::from(second)))?
        .checked_add(&Duration::nanoseconds(i64::from(nanosecond)))?;
    midnight.checked_add_signed(clock)?.and_local_timezone(offset).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn unit_words_map_to_grains() {
        assert_eq!(Grain::from_unit("minutes"), Some(Grain::Minute));
        assert_eq!(Grain::from_unit("m"), Some(Grain::Minute));
        assert_eq!(Grain::from_unit("months"), Some(Grain::Month));
        assert_eq!(Grain::from_unit("hrs"), Some(Grain::Hour));
        assert_eq!(Grain::from_unit("wk"), Some(Grain::Week));
        assert_eq!(Grain::from_unit("yrs"), Some(Grain::Year));
        assert_eq!(Grain::from_unit("fortnight"), None);
    }

    #[test]
    fn scaled_handles_fractions_and_overflow() {
        assert_eq!(scaled(2.5, Duration::minutes(1)), Some(Duration::seconds(150)));
        assert_eq!(scaled(f64::INFINITY, Duration::hours(1)), None);
        assert_eq!(scaled(1e30, Duration::hours(1)), None);
    }

    #[test]
    fn month_shift_rolls_day_overflow_forward() {
        let shifted = shift_datetime_by_grain(at("2023-01-31T08:00:00+00:00"), 1, Grain::Month).unwrap();
        assert_eq!(shifted, at("2023-03-03T08:00:00+00:00"));
    }

    #[test]
    fn year_shift_keeps_the_offset() {
        let shifted = shift_datetime_by_grain(at("1970-01-01T00:00:00-05:00"), 2, Grain::Year).unwrap();
        assert_eq!(shifted, at("1972-01-01T00:00:00-05:00"));
    }

    #[test]
    fn negative_month_shift_crosses_year() {
        let shifted = shift_datetime_by_grain(at("2024-02-15T00:00:00+00:00"), -3, Grain::Month).unwrap();
        assert_eq!(shifted, at("2023-11-15T00:00:00+00:00"));
    }

    #[test]
    fn fractional_days_split_into_calendar_and_clock() {
        let shifted = shift_datetime_by_amount(at("2024-04-10T00:00:00+00:00"), 1.5, Grain::Day).unwrap();
        assert_eq!(shifted, at("2024-04-11T12:00:00+00:00"));
    }

    #[test]
    fn fractional_months_are_rejected() {
        assert_eq!(shift_datetime_by_amount(at("2024-04-10T00:00:00+00:00"), 1.5, Grain::Month), None);
    }

    #[test]
    fn normalized_datetime_rolls_every_field() {
        let offset = FixedOffset::east_opt(0).unwrap();
        assert_eq!(normalized_datetime(1985, 10, 32, 0, 0, 0, 0, offset), Some(at("1985-11-01T00:00:00Z")));
        assert_eq!(normalized_datetime(1970, 1, 1, 24, 0, 0, 0, offset), Some(at("1970-01-02T00:00:00Z")));
        assert_eq!(normalized_datetime(1970, 1, 1, 3, 75, 0, 0, offset), Some(at("1970-01-01T04:15:00Z")));
        assert_eq!(normalized_date(2024, 3, 0), NaiveDate::from_ymd_opt(2024, 2, 29));
    }
}
