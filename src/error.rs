//! Error types.
//!
//! Every failure is handed back to the caller of [`Parser::parse`] (or of a
//! catalog constructor / timezone lookup) as an [`Error`] value. Nothing is
//! retried and a failed parse never yields a partially-filled result.
//!
//! [`Parser::parse`]: crate::Parser::parse

use chrono::NaiveDateTime;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A rule's pattern failed to compile while the catalog was being built.
    #[error("rule `{rule}`: invalid pattern: {source}")]
    Pattern {
        /// Name of the offending rule.
        rule: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// A semantic function could not convert a captured group to the form it expects.
    #[error("rule `{rule}`: cannot convert capture `{group}` ({value:?}): {reason}")]
    Capture {
        /// Name of the rule whose semantic function failed.
        rule: String,
        /// Named group that held the bad value.
        group: String,
        /// The captured text.
        value: String,
        /// Why the conversion failed.
        reason: String,
    },

    /// Date/time arithmetic left the representable range.
    #[error("rule `{rule}`: resulting time is out of range")]
    OutOfRange {
        /// Name of the rule whose semantic function overflowed.
        rule: String,
    },

    /// The wall-clock time does not exist in the target zone (DST gap).
    #[error("local time {time} does not exist in {zone}")]
    NonexistentLocalTime {
        /// The wall-clock time that was skipped.
        time: NaiveDateTime,
        /// The zone it was being placed in.
        zone: String,
    },

    /// The abbreviation is not a known timezone code.
    #[error("invalid timezone {0:?}")]
    UnknownTimezone(String),

    /// The abbreviation is known but has no location in the timezone database.
    #[error("no location data for {0:?}")]
    NoLocation(String),
}

impl Error {
    pub(crate) fn capture(rule: &str, group: &str, value: &str, reason: impl ToString) -> Self {
        Error::Capture {
            rule: rule.to_string(),
            group: group.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn out_of_range(rule: &str) -> Self {
        Error::OutOfRange { rule: rule.to_string() }
    }
}
