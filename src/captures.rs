//! Named captures handed to semantic functions.
//!
//! A rule's semantic function never sees the raw `regex::Captures`; it gets a
//! [`Captures`] keyed by group name, with every value lowercased. A group that
//! did not take part in the match is `None` from [`Captures::get`] and `""`
//! from [`Captures::text`], so optional groups can be read either way without
//! confusing "absent" and "matched the empty string".

use crate::Error;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    rule: String,
    whole: String,
    groups: HashMap<String, Option<String>>,
}

impl Captures {
    /// Build from a regex match. Every named group of `re` gets an entry.
    pub(crate) fn from_regex(rule: &str, re: &regex::Regex, caps: &regex::Captures<'_>) -> Self {
        let groups = re
            .capture_names()
            .flatten()
            .map(|name| (name.to_string(), caps.name(name).map(|m| m.as_str().to_lowercase())))
            .collect();
        let whole = caps.get(0).map(|m| m.as_str().to_lowercase()).unwrap_or_default();
        Captures { rule: rule.to_string(), whole, groups }
    }

    /// Build from explicit pairs. Handy for exercising a rule's semantics directly.
    pub fn from_pairs<'a>(rule: &str, pairs: impl IntoIterator<Item = (&'a str, Option<&'a str>)>) -> Self {
        let groups = pairs.into_iter().map(|(k, v)| (k.to_string(), v.map(str::to_lowercase))).collect();
        Captures { rule: rule.to_string(), whole: String::new(), groups }
    }

    /// Name of the rule these captures belong to.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// The whole match, lowercased.
    pub fn whole(&self) -> &str {
        &self.whole
    }

    /// Value of a group that participated in the match.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.groups.get(name).and_then(|v| v.as_deref())
    }

    /// Value of a group, or `""` when it is absent.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// True when the group participated with a non-empty value.
    pub fn has(&self, name: &str) -> bool {
        !self.text(name).is_empty()
    }

    /// Parse an optional group. An absent or empty group is `Ok(None)`.
    pub fn parse<T>(&self, name: &str) -> Result<Option<T>, Error>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(name) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|e| Error::capture(&self.rule, name, raw, e)),
        }
    }

    /// Parse a group the pattern guarantees is present.
    pub fn require<T>(&self, name: &str) -> Result<T, Error>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.parse(name)?.ok_or_else(|| Error::capture(&self.rule, name, "", "group did not match"))
    }
}
