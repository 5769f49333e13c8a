//! Parsing utilities for extracting values from captures

use super::shift::Grain;
use crate::{Captures, Error};

/// Month number (1-12) from a month name or its three-letter abbreviation.
pub fn month_from_name(name: &str) -> Option<u32> {
    let prefix = name.get(..3)?.to_ascii_lowercase();
    match prefix.as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

/// Read the `unit` group as a [`Grain`].
pub fn grain_capture(caps: &Captures, group: &str) -> Result<Grain, Error> {
    let unit = caps.text(group);
    Grain::from_unit(unit).ok_or_else(|| Error::capture(caps.rule(), group, unit, "unknown unit"))
}

/// Read the `amount` group as a float magnitude.
pub fn amount_capture(caps: &Captures, group: &str) -> Result<f64, Error> {
    caps.require::<f64>(group)
}
