use crate::clock::{Clock, SystemClock, start_of_day};
use crate::engine;
use crate::{Catalog, Error, Span};
use chrono::{DateTime, Duration, FixedOffset};
use std::sync::Arc;

pub use crate::engine::{PassStatus, RulePass};

/// Parsing context.
///
/// Holds the reference instants relative expressions ("today", "tomorrow")
/// resolve against. A parser captures one per call with a single clock read,
/// so every rule in that call agrees on what "now" is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// The reference instant.
    pub now: DateTime<FixedOffset>,
    /// Start of the reference instant's calendar day, same offset.
    pub today: DateTime<FixedOffset>,
}

impl Context {
    /// Context for a fixed reference instant.
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        Context { now, today: start_of_day(now) }
    }

    /// Read `clock` once.
    pub fn capture(clock: &dyn Clock) -> Self {
        Context::at(clock.now())
    }
}

/// How many matches of a rule's pattern are applied per input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Every non-overlapping match, left to right.
    #[default]
    All,
    /// Only the leftmost match. Kept for callers that depend on the older
    /// single-occurrence behavior.
    First,
}

/// Options that affect matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub match_mode: MatchMode,
}

/// Result of [`Parser::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// The extracted absolute time.
    pub time: DateTime<FixedOffset>,
    /// The accumulated duration (zero when none was mentioned).
    pub duration: Duration,
    /// The input with every matched span removed and whitespace normalized.
    pub text: String,
    /// Byte spans of every applied match, in the order they were found.
    pub spans: Vec<Span>,
}

/// Per-rule trace returned by [`Parser::parse_verbose`].
#[derive(Debug, Clone)]
pub struct ParseDetails {
    /// The context the run resolved against.
    pub context: Context,
    /// Total elapsed time.
    pub total: std::time::Duration,
    /// Time spent building the residual text.
    pub reduce: std::time::Duration,
    /// One entry per catalog rule, in catalog order.
    pub passes: Vec<RulePass>,
}

impl ParseDetails {
    /// Names of the rules that applied at least one match, in catalog order.
    pub fn applied_rules(&self) -> Vec<&str> {
        self.passes.iter().filter(|p| matches!(p.status, PassStatus::Applied(_))).map(|p| p.rule.as_str()).collect()
    }
}

/// Result of [`Parser::parse_verbose`].
#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    pub result: ParseResult,
    pub details: ParseDetails,
}

/// Extracts times and durations from text with an ordered rule catalog.
///
/// A `Parser` is immutable once built and can be shared between threads.
///
/// ```
/// use chrono::DateTime;
/// use tempus::{FixedClock, Parser};
///
/// let now = DateTime::parse_from_rfc3339("1970-01-01T00:00:00Z").unwrap();
/// let parser = Parser::builder().with_clock(FixedClock(now)).build().unwrap();
///
/// let res = parser.parse("buy flowers in 2.5 minutes").unwrap();
/// assert_eq!(res.time.to_rfc3339(), "1970-01-01T00:02:30+00:00");
/// assert_eq!(res.text, "buy flowers");
/// ```
pub struct Parser {
    catalog: Catalog,
    clock: Arc<dyn Clock>,
    options: Options,
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("catalog", &self.catalog)
            .field("clock", &"<clock>")
            .field("options", &self.options)
            .finish()
    }
}

impl Parser {
    /// A parser with the built-in English catalog and the system clock.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    pub fn builder() -> ParserBuilder {
        ParserBuilder::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse `text` against the parser's clock.
    pub fn parse(&self, text: &str) -> Result<ParseResult, Error> {
        self.parse_with(text, &Context::capture(self.clock.as_ref()))
    }

    /// Parse `text` against an explicit context instead of the clock.
    pub fn parse_with(&self, text: &str, context: &Context) -> Result<ParseResult, Error> {
        let run = engine::Parser::new(text, &self.catalog).run(context, &self.options)?;
        Ok(ParseResult { time: run.time, duration: run.duration, text: run.text, spans: run.spans })
    }

    /// Parse `text` and also return a per-rule trace of the run.
    pub fn parse_verbose(&self, text: &str) -> Result<ParseResultVerbose, Error> {
        self.parse_verbose_with(text, &Context::capture(self.clock.as_ref()))
    }

    pub fn parse_verbose_with(&self, text: &str, context: &Context) -> Result<ParseResultVerbose, Error> {
        let run = engine::Parser::new(text, &self.catalog).run_with_metrics(context, &self.options)?;
        let metrics = run.metrics.unwrap_or_default();

        Ok(ParseResultVerbose {
            result: ParseResult { time: run.time, duration: run.duration, text: run.text, spans: run.spans },
            details: ParseDetails {
                context: *context,
                total: metrics.total,
                reduce: metrics.reduce,
                passes: metrics.passes,
            },
        })
    }
}

/// Configures a [`Parser`].
#[derive(Default)]
pub struct ParserBuilder {
    rules: Option<Catalog>,
    clock: Option<Arc<dyn Clock>>,
    options: Options,
}

impl ParserBuilder {
    /// Replace the rule catalog wholesale. Defaults to [`rules::en::catalog`](crate::rules::en::catalog).
    pub fn with_rules(mut self, catalog: Catalog) -> Self {
        self.rules = Some(catalog);
        self
    }

    /// Replace the reference clock. Defaults to [`SystemClock`].
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Build the parser, compiling the default catalog if none was given.
    pub fn build(self) -> Result<Parser, Error> {
        let catalog = match self.rules {
            Some(catalog) => catalog,
            None => crate::rules::en::catalog()?,
        };
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        tracing::debug!(rules = catalog.len(), options = ?self.options, "parser ready");
        Ok(Parser { catalog, clock, options: self.options })
    }
}
