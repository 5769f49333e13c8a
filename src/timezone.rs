//! Timezone abbreviation lookup.
//!
//! Abbreviations are resolved through a static table to IANA names, which are
//! then loaded from the `chrono-tz` database. The first name listed for a code
//! wins. Abbreviations are ambiguous in the wild ("IST", "CST"); the table
//! picks one reading per code and that choice is final.

use crate::Error;
use chrono_tz::Tz;

static TIMEZONES: &[(&str, &[&str])] = &[
    ("ACDT", &["Australia/Adelaide"]),
    ("ACST", &["Australia/Darwin", "Australia/Adelaide"]),
    ("AEDT", &["Australia/Sydney", "Australia/Melbourne"]),
    ("AEST", &["Australia/Brisbane", "Australia/Sydney"]),
    ("AET", &["Australia/Sydney"]),
    ("AFT", &["Asia/Kabul"]),
    ("AKDT", &["America/Anchorage"]),
    ("AKST", &["America/Anchorage"]),
    ("ADT", &["America/Halifax"]),
    ("AST", &["America/Puerto_Rico", "America/Halifax"]),
    ("ART", &["America/Argentina/Buenos_Aires"]),
    ("AWST", &["Australia/Perth"]),
    ("BRT", &["America/Sao_Paulo"]),
    ("BST", &["Europe/London"]),
    ("CAT", &["Africa/Maputo", "Africa/Harare"]),
    ("CDT", &["America/Chicago"]),
    ("CEST", &["Europe/Paris", "Europe/Berlin"]),
    ("CET", &["Europe/Paris", "Europe/Berlin"]),
    ("CLT", &["America/Santiago"]),
    ("COT", &["America/Bogota"]),
    ("CST", &["America/Chicago"]),
    ("CT", &["America/Chicago"]),
    ("EAT", &["Africa/Nairobi"]),
    ("EDT", &["America/New_York"]),
    ("EEST", &["Europe/Athens", "Europe/Helsinki"]),
    ("EET", &["Europe/Athens", "Europe/Helsinki"]),
    ("EST", &["America/New_York"]),
    ("ET", &["America/New_York"]),
    ("GMT", &["Etc/GMT"]),
    ("GST", &["Asia/Dubai"]),
    ("HKT", &["Asia/Hong_Kong"]),
    ("HST", &["Pacific/Honolulu"]),
    ("ICT", &["Asia/Bangkok"]),
    ("IDT", &["Asia/Jerusalem"]),
    ("IRST", &["Asia/Tehran"]),
    ("IST", &["Asia/Kolkata"]),
    ("JST", &["Asia/Tokyo"]),
    ("KST", &["Asia/Seoul"]),
    ("MDT", &["America/Denver"]),
    ("MSK", &["Europe/Moscow"]),
    ("MST", &["America/Phoenix", "America/Denver"]),
    ("MT", &["America/Denver"]),
    ("NDT", &["America/St_Johns"]),
    ("NPT", &["Asia/Kathmandu"]),
    ("NST", &["America/St_Johns"]),
    ("NZDT", &["Pacific/Auckland"]),
    ("NZST", &["Pacific/Auckland"]),
    ("PDT", &["America/Los_Angeles"]),
    ("PET", &["America/Lima"]),
    ("PHT", &["Asia/Manila"]),
    ("PKT", &["Asia/Karachi"]),
    ("PST", &["America/Los_Angeles"]),
    ("PT", &["America/Los_Angeles"]),
    ("SAST", &["Africa/Johannesburg"]),
    ("SGT", &["Asia/Singapore"]),
    ("UTC", &["Etc/UTC"]),
    ("WAT", &["Africa/Lagos"]),
    ("WEST", &["Europe/Lisbon"]),
    ("WET", &["Europe/Lisbon"]),
    ("WIB", &["Asia/Jakarta"]),
    // The Etc/GMT zones use POSIX signs: Etc/GMT-1 is one hour *ahead* of UTC.
    ("GMT+1", &["Etc/GMT-1"]),
    ("GMT+2", &["Etc/GMT-2"]),
    ("GMT+3", &["Etc/GMT-3"]),
    ("GMT+4", &["Etc/GMT-4"]),
    ("GMT+5", &["Etc/GMT-5"]),
    ("GMT+6", &["Etc/GMT-6"]),
    ("GMT+7", &["Etc/GMT-7"]),
    ("GMT+8", &["Etc/GMT-8"]),
    ("GMT+9", &["Etc/GMT-9"]),
    ("GMT+10", &["Etc/GMT-10"]),
    ("GMT+11", &["Etc/GMT-11"]),
    ("GMT+12", &["Etc/GMT-12"]),
    ("GMT+13", &["Etc/GMT-13"]),
    ("GMT+14", &["Etc/GMT-14"]),
    ("GMT-1", &["Etc/GMT+1"]),
    ("GMT-2", &["Etc/GMT+2"]),
    ("GMT-3", &["Etc/GMT+3"]),
    ("GMT-4", &["Etc/GMT+4"]),
    ("GMT-5", &["Etc/GMT+5"]),
    ("GMT-6", &["Etc/GMT+6"]),
    ("GMT-7", &["Etc/GMT+7"]),
    ("GMT-8", &["Etc/GMT+8"]),
    ("GMT-9", &["Etc/GMT+9"]),
    ("GMT-10", &["Etc/GMT+10"]),
    ("GMT-11", &["Etc/GMT+11"]),
    ("GMT-12", &["Etc/GMT+12"]),
];

/// Resolve a timezone abbreviation such as `"PST"` (any case) to a zone.
pub fn lookup(code: &str) -> Result<Tz, Error> {
    resolve_in(TIMEZONES, code)
}

/// All recognized abbreviations, upper-case.
pub fn codes() -> impl Iterator<Item = &'static str> {
    TIMEZONES.iter().map(|(code, _)| *code)
}

/// A regex alternation of every recognized abbreviation.
///
/// Longer codes come first so `GMT+10` is preferred over `GMT+1` and `GMT`.
pub fn pattern() -> String {
    let mut codes: Vec<&str> = codes().collect();
    codes.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    codes.iter().map(|c| regex::escape(c)).collect::<Vec<_>>().join("|")
}

fn resolve_in(table: &[(&str, &[&str])], code: &str) -> Result<Tz, Error> {
    let upper = code.to_ascii_uppercase();
    let (_, names) =
        table.iter().find(|(c, _)| *c == upper).ok_or_else(|| Error::UnknownTimezone(code.to_string()))?;

    names.first().and_then(|name| name.parse::<Tz>().ok()).ok_or(Error::NoLocation(upper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, TimeZone};

    #[test]
    fn known_codes_resolve_case_insensitively() {
        assert_eq!(lookup("PST").unwrap(), Tz::America__Los_Angeles);
        assert_eq!(lookup("pst").unwrap(), Tz::America__Los_Angeles);
        assert_eq!(lookup("UTC").unwrap(), Tz::Etc__UTC);
    }

    #[test]
    fn unknown_code_is_an_error() {
        let err = lookup("XYZ").unwrap_err();
        assert!(matches!(err, Error::UnknownTimezone(ref c) if c == "XYZ"));
        assert_eq!(err.to_string(), "invalid timezone \"XYZ\"");
    }

    #[test]
    fn known_code_without_location_is_an_error() {
        let table: &[(&str, &[&str])] = &[("NOP", &[]), ("BAD", &["Not/A_Zone"])];
        assert!(matches!(resolve_in(table, "nop"), Err(Error::NoLocation(ref c)) if c == "NOP"));
        assert!(matches!(resolve_in(table, "BAD"), Err(Error::NoLocation(_))));
    }

    #[test]
    fn every_table_entry_resolves() {
        for code in codes() {
            assert!(lookup(code).is_ok(), "{code} does not resolve");
        }
    }

    #[test]
    fn gmt_offsets_use_conventional_signs() {
        let tz = lookup("GMT+2").unwrap();
        let midnight = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let offset = tz.offset_from_utc_datetime(&midnight).fix();
        assert_eq!(offset.local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn pattern_prefers_longer_codes() {
        let re = regex::Regex::new(&format!(r"\b(?:{})\b", pattern())).unwrap();
        assert_eq!(re.find("at 5 GMT+10").unwrap().as_str(), "GMT+10");
        assert_eq!(re.find("at 5 GMT").unwrap().as_str(), "GMT");
    }
}
