//! English rule catalog.
//!
//! The order below is a contract. Later rules see the time left behind by
//! earlier ones, so "yesterday"/"tomorrow"/"today" (which reset the day) come
//! before "at" (which sets the hour on whatever day is current), and
//! "timezone" comes last so it reinterprets the finished wall-clock time.

mod helpers;
mod rules_dates;
mod rules_durations;
mod rules_instants;
mod rules_time_of_day;
mod rules_time_shifts;
mod rules_timezones;


pub use rules_dates::rule_date;
pub use rules_durations::rule_duration;
pub use rules_instants::{rule_today, rule_tomorrow, rule_yesterday};
pub use rules_time_of_day::rule_at_time;
pub use rules_time_shifts::rule_in_offset;
pub use rules_timezones::rule_timezone;

use crate::{Catalog, Error};

/// Build the English catalog.
pub fn catalog() -> Result<Catalog, Error> {
    [
        rule_yesterday(),
        rule_tomorrow(),
        rule_today(),
        rule_at_time(),
        rule_duration(),
        rule_date(),
        rule_in_offset(),
        rule_timezone(),
    ]
    .into_iter()
    .collect()
}
