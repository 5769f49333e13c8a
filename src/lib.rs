//! Rule-based extraction of times and durations from short English fragments.
//!
//! ```
//! use chrono::DateTime;
//! use tempus::{FixedClock, Parser};
//!
//! let now = DateTime::parse_from_rfc3339("1970-01-01T00:00:00Z").unwrap();
//! let parser = Parser::builder().with_clock(FixedClock(now)).build().unwrap();
//!
//! let res = parser.parse("block time tomorrow for 2 hours at 3pm").unwrap();
//! assert_eq!(res.time.to_rfc3339(), "1970-01-02T15:00:00+00:00");
//! assert_eq!(res.duration, chrono::Duration::hours(2));
//! assert_eq!(res.text, "block time");
//! ```

#[macro_use]
mod macros;
mod api;
mod captures;
mod clock;
mod engine;
mod error;
pub mod rules;
pub mod timezone;

pub use api::{
    Context, MatchMode, Options, ParseDetails, ParseResult, ParseResultVerbose, Parser, ParserBuilder, PassStatus,
    RulePass,
};
pub use captures::Captures;
pub use clock::{Clock, FixedClock, SystemClock, start_of_day};
pub use engine::{BucketMask, reduce};
pub use error::Error;

#[doc(hidden)]
pub use chrono as __chrono;

use chrono::{DateTime, Duration, FixedOffset};
use regex::{Regex, RegexBuilder};

// --- Spans ------------------------------------------------------------------

/// A contiguous byte range of the input consumed by one rule match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// --- Rules ------------------------------------------------------------------

/// Which accumulator a rule updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Time,
    Duration,
}

pub type TimeFn =
    Box<dyn Fn(&Context, DateTime<FixedOffset>, &Captures) -> Result<DateTime<FixedOffset>, Error> + Send + Sync>;
pub type DurationFn = Box<dyn Fn(Duration, &Captures) -> Result<Duration, Error> + Send + Sync>;

/// The semantic half of a rule. A rule updates exactly one accumulator.
pub enum Semantics {
    /// `(context, current time, captures) -> new time`
    Time(TimeFn),
    /// `(current duration, captures) -> new duration`
    Duration(DurationFn),
}

impl Semantics {
    pub fn kind(&self) -> RuleKind {
        match self {
            Semantics::Time(_) => RuleKind::Time,
            Semantics::Duration(_) => RuleKind::Duration,
        }
    }
}

/// A pattern rule: a name, a compiled pattern with named groups, and the
/// semantic function fed with every match.
///
/// Rules are built through [`Rule::builder`] (or the `rule!` macro), which
/// compiles the pattern eagerly so a bad pattern is a construction error.
pub struct Rule {
    name: String,
    pattern: Regex,
    semantics: Semantics,
    buckets: BucketMask,
    enabled: bool,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("semantics", &self.semantics.kind())
            .field("buckets", &self.buckets)
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Rule {
    pub fn builder(name: impl Into<String>, pattern: impl Into<String>) -> RuleBuilder {
        RuleBuilder {
            name: name.into(),
            pattern: pattern.into(),
            case_insensitive: true,
            unicode: true,
            buckets: BucketMask::empty(),
            enabled: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn semantics(&self) -> &Semantics {
        &self.semantics
    }

    pub fn kind(&self) -> RuleKind {
        self.semantics.kind()
    }

    /// Coarse input features the pattern cannot match without.
    pub fn buckets(&self) -> BucketMask {
        self.buckets
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return the rule with its enabled flag set to `enabled`.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Collects a rule's options before the pattern is compiled.
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    name: String,
    pattern: String,
    case_insensitive: bool,
    unicode: bool,
    buckets: BucketMask,
    enabled: bool,
}

impl RuleBuilder {
    /// Lexical rules match case-insensitively unless told otherwise.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Unicode-aware matching, on by default. Turn it off for purely ASCII
    /// vocabularies: case-insensitive Unicode matching also folds `ſ` to `s`
    /// and the Kelvin sign to `k`, which an ASCII bucket scan cannot see.
    pub fn unicode(mut self, yes: bool) -> Self {
        self.unicode = yes;
        self
    }

    /// Declare input features the pattern needs. Must be necessary conditions:
    /// a rule is skipped when the input lacks any of them.
    pub fn buckets(mut self, buckets: BucketMask) -> Self {
        self.buckets = buckets;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Finish as a time-rule.
    pub fn time<F>(self, f: F) -> Result<Rule, Error>
    where
        F: Fn(&Context, DateTime<FixedOffset>, &Captures) -> Result<DateTime<FixedOffset>, Error> + Send + Sync + 'static,
    {
        self.finish(Semantics::Time(Box::new(f)))
    }

    /// Finish as a duration-rule.
    pub fn duration<F>(self, f: F) -> Result<Rule, Error>
    where
        F: Fn(Duration, &Captures) -> Result<Duration, Error> + Send + Sync + 'static,
    {
        self.finish(Semantics::Duration(Box::new(f)))
    }

    fn finish(self, semantics: Semantics) -> Result<Rule, Error> {
        let pattern = RegexBuilder::new(&self.pattern)
            .case_insensitive(self.case_insensitive)
            .unicode(self.unicode)
            .build()
            .map_err(|source| Error::Pattern { rule: self.name.clone(), source })?;

        Ok(Rule { name: self.name, pattern, semantics, buckets: self.buckets, enabled: self.enabled })
    }
}

// --- Catalog ----------------------------------------------------------------

/// An ordered rule catalog.
///
/// Order is part of the contract: the parser folds over the rules front to
/// back and each rule sees the time/duration left behind by the rules before
/// it. Disabled rules keep their slot.
#[derive(Debug, Default)]
pub struct Catalog {
    rules: Vec<Rule>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Append a rule at the end of the fold.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn with(mut self, rule: Rule) -> Self {
        self.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Enable every rule called `name`. Returns whether any rule matched.
    pub fn enable(&mut self, name: &str) -> bool {
        self.set_enabled(name, true)
    }

    /// Disable every rule called `name`. Returns whether any rule matched.
    pub fn disable(&mut self, name: &str) -> bool {
        self.set_enabled(name, false)
    }

    fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        let mut found = false;
        for rule in self.rules.iter_mut().filter(|r| r.name == name) {
            rule.enabled = enabled;
            found = true;
        }
        found
    }
}

impl From<Vec<Rule>> for Catalog {
    fn from(rules: Vec<Rule>) -> Self {
        Catalog { rules }
    }
}

impl FromIterator<Rule> for Catalog {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Catalog { rules: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_time(name: &str, pattern: &str) -> Result<Rule, Error> {
        Rule::builder(name, pattern).time(|_, t, _| Ok(t))
    }

    #[test]
    fn bad_pattern_is_a_construction_error() {
        let err = noop_time("broken", r"at (?P<hour>[0-9]").unwrap_err();
        assert!(matches!(err, Error::Pattern { ref rule, .. } if rule == "broken"));
    }

    #[test]
    fn rule_reports_its_kind() {
        let time = noop_time("t", "x").unwrap();
        let dur = Rule::builder("d", "y").duration(|d, _| Ok(d)).unwrap();
        assert_eq!(time.kind(), RuleKind::Time);
        assert_eq!(dur.kind(), RuleKind::Duration);
    }

    #[test]
    fn lexical_rules_default_to_case_insensitive() {
        let rule = noop_time("pm", "pm").unwrap();
        assert!(rule.pattern().is_match("3PM"));

        let strict = Rule::builder("tz", "PST").case_insensitive(false).time(|_, t, _| Ok(t)).unwrap();
        assert!(!strict.pattern().is_match("pst"));
    }

    #[test]
    fn ascii_rules_do_not_fold_long_s() {
        let folding = noop_time("sep", r"\bsep\b").unwrap();
        assert!(folding.pattern().is_match("\u{17f}ep"));

        let ascii = Rule::builder("sep", r"\bsep\b").unicode(false).time(|_, t, _| Ok(t)).unwrap();
        assert!(ascii.pattern().is_match("SEP"));
        assert!(!ascii.pattern().is_match("\u{17f}ep"));
    }

    #[test]
    fn catalog_keeps_order_and_toggles_by_name() {
        let mut catalog: Catalog =
            [noop_time("a", "a"), noop_time("b", "b"), noop_time("c", "c")].into_iter().collect::<Result<_, _>>().unwrap();

        assert!(catalog.disable("b"));
        assert!(!catalog.disable("missing"));

        let names: Vec<&str> = catalog.iter().map(Rule::name).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(!catalog.get("b").unwrap().is_enabled());

        assert!(catalog.enable("b"));
        assert!(catalog.get("b").unwrap().is_enabled());
    }

    #[test]
    fn span_len() {
        assert_eq!(Span::new(3, 8).len(), 5);
        assert!(Span::new(4, 4).is_empty());
    }
}
