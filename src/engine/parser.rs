//! The rule fold.
//!
//! This module is the operational core of the engine:
//!
//! - Scan the input once for trigger buckets (see `trigger.rs`).
//! - Walk the catalog front to back. Each enabled, ungated rule is matched
//!   against the whole input and its semantic function is applied to every
//!   non-overlapping match, left to right.
//! - Build the residual text from the collected spans (see `reduce.rs`).
//!
//! ## Accumulators
//!
//! ```text
//!            time-rule                 duration-rule
//! time ──▶ f(ctx, time, caps) ──▶ time      │
//! duration ───────────────────────────▶ g(duration, caps) ──▶ duration
//! ```
//!
//! The two accumulators never cross: a time-rule cannot see or change the
//! duration and vice versa. `time` starts at the start of the reference day
//! and `duration` at zero.
//!
//! ## Failure
//!
//! The first semantic function to fail aborts the run. Partial state is
//! dropped with the accumulator; the caller only ever sees the error.

use super::metrics::{PassStatus, RulePass, RunMetrics};
use super::reduce::reduce;
use super::trigger::TriggerInfo;
use crate::{Captures, Catalog, Context, Error, MatchMode, Options, Rule, Semantics, Span};
use chrono::{DateTime, Duration, FixedOffset};
use std::time::Instant;
use tracing::{debug, trace};

/// Output of a run.
#[derive(Debug, Clone)]
pub(crate) struct RunResult {
    pub time: DateTime<FixedOffset>,
    pub duration: Duration,
    pub text: String,
    pub spans: Vec<Span>,
    /// Only populated by [`Parser::run_with_metrics`].
    pub metrics: Option<RunMetrics>,
}

/// Running state of the fold.
#[derive(Debug)]
struct Accumulator {
    time: DateTime<FixedOffset>,
    duration: Duration,
    spans: Vec<Span>,
}

/// One run of a catalog over one input.
///
/// Usage: `Parser::new(input, &catalog).run(&context, &options)`.
#[derive(Debug)]
pub(crate) struct Parser<'a> {
    input: &'a str,
    catalog: &'a Catalog,
    trigger: TriggerInfo,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, catalog: &'a Catalog) -> Self {
        let trigger = TriggerInfo::scan(input);
        trace!(buckets = ?trigger.buckets, "trigger scan");
        Parser { input, catalog, trigger }
    }

    /// Why `rule` will not be matched at all, if it will not.
    fn skip_reason(&self, rule: &Rule) -> Option<PassStatus> {
        if !rule.is_enabled() {
            Some(PassStatus::Disabled)
        } else if !self.trigger.satisfies(rule.buckets()) {
            Some(PassStatus::Gated)
        } else {
            None
        }
    }

    /// Match `rule` against the input and feed every match to its semantics.
    ///
    /// Returns the spans of the applied matches.
    fn apply_rule(
        &self,
        rule: &Rule,
        context: &Context,
        options: &Options,
        acc: &mut Accumulator,
    ) -> Result<Vec<Span>, Error> {
        let limit = match options.match_mode {
            MatchMode::All => usize::MAX,
            MatchMode::First => 1,
        };

        let mut spans = Vec::new();
        for caps in rule.pattern().captures_iter(self.input).take(limit) {
            let Some(whole) = caps.get(0) else { continue };
            let captures = Captures::from_regex(rule.name(), rule.pattern(), &caps);

            match rule.semantics() {
                Semantics::Time(f) => acc.time = f(context, acc.time, &captures)?,
                Semantics::Duration(f) => acc.duration = f(acc.duration, &captures)?,
            }

            let span = Span::new(whole.start(), whole.end());
            debug!(
                rule = rule.name(),
                kind = ?rule.kind(),
                start = span.start,
                end = span.end,
                text = whole.as_str(),
                "applied match"
            );
            spans.push(span);
        }
        Ok(spans)
    }

    /// Fold the catalog over the input, optionally tracing every rule.
    fn fold(
        &self,
        context: &Context,
        options: &Options,
        mut passes: Option<&mut Vec<RulePass>>,
    ) -> Result<Accumulator, Error> {
        let mut acc = Accumulator { time: context.today, duration: Duration::zero(), spans: Vec::new() };

        for rule in self.catalog {
            let start = Instant::now();

            let (status, spans) = match self.skip_reason(rule) {
                Some(status) => {
                    trace!(rule = rule.name(), ?status, "rule skipped");
                    (status, Vec::new())
                }
                None => {
                    let spans = self.apply_rule(rule, context, options, &mut acc)?;
                    let status = if spans.is_empty() { PassStatus::NoMatch } else { PassStatus::Applied(spans.len()) };
                    (status, spans)
                }
            };

            acc.spans.extend_from_slice(&spans);

            if let Some(passes) = passes.as_deref_mut() {
                passes.push(RulePass {
                    rule: rule.name().to_string(),
                    kind: rule.kind(),
                    status,
                    spans,
                    duration: start.elapsed(),
                });
            }
        }

        Ok(acc)
    }

    /// Run the fold and build the residual text, collecting a per-rule trace.
    pub fn run_with_metrics(self, context: &Context, options: &Options) -> Result<RunResult, Error> {
        let total_start = Instant::now();
        let mut passes = Vec::with_capacity(self.catalog.len());
        let acc = self.fold(context, options, Some(&mut passes))?;

        let reduce_start = Instant::now();
        let text = reduce(self.input, &acc.spans);
        let reduce_elapsed = reduce_start.elapsed();

        let metrics = RunMetrics { total: total_start.elapsed(), reduce: reduce_elapsed, passes };
        Ok(RunResult { time: acc.time, duration: acc.duration, text, spans: acc.spans, metrics: Some(metrics) })
    }

    /// Run the fold and build the residual text.
    pub fn run(self, context: &Context, options: &Options) -> Result<RunResult, Error> {
        let acc = self.fold(context, options, None)?;
        let text = reduce(self.input, &acc.spans);
        Ok(RunResult { time: acc.time, duration: acc.duration, text, spans: acc.spans, metrics: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BucketMask;
    use chrono::Timelike;

    fn context() -> Context {
        Context::at(DateTime::parse_from_rfc3339("2013-02-12T04:30:00Z").unwrap())
    }

    fn next_day() -> Rule {
        rule! {
            name: "next day",
            pattern: r"\bnext day\b",
            time: |ctx, _t, _caps| {
                Ok(ctx.today + Duration::days(1))
            }
        }
        .unwrap()
    }

    fn at_hour() -> Rule {
        rule! {
            name: "at hour",
            pattern: r"\bat (?P<hour>[0-9]{1,2})\b",
            buckets: BucketMask::HAS_DIGITS,
            time: |_ctx, t, caps| {
                let hour: u32 = caps.require("hour")?;
                t.with_hour(hour).ok_or_else(|| Error::out_of_range(caps.rule()))
            }
        }
        .unwrap()
    }

    fn minutes() -> Rule {
        rule! {
            name: "minutes",
            pattern: r"\bfor (?P<n>[0-9.]+) min\b",
            buckets: BucketMask::HAS_DIGITS,
            duration: |d, caps| {
                let n: f64 = caps.require("n")?;
                Ok(d + Duration::seconds((n * 60.0) as i64))
            }
        }
        .unwrap()
    }

    fn run(catalog: &Catalog, input: &str) -> Result<RunResult, Error> {
        Parser::new(input, catalog).run(&context(), &Options::default())
    }

    #[test]
    fn time_starts_at_reference_day_and_duration_at_zero() {
        let catalog = Catalog::from(vec![next_day(), minutes()]);
        let res = run(&catalog, "nothing to see").unwrap();
        assert_eq!(res.time, context().today);
        assert_eq!(res.duration, Duration::zero());
        assert_eq!(res.text, "nothing to see");
        assert!(res.spans.is_empty());
    }

    #[test]
    fn later_rules_see_earlier_results() {
        let catalog = Catalog::from(vec![next_day(), at_hour()]);
        let res = run(&catalog, "sync next day at 9").unwrap();
        assert_eq!(res.time.to_rfc3339(), "2013-02-13T09:00:00+00:00");
        assert_eq!(res.text, "sync");
    }

    #[test]
    fn reordering_non_commuting_rules_changes_the_time() {
        // "next day" resets to the reference day, so it must run first.
        let documented = Catalog::from(vec![next_day(), at_hour()]);
        let reversed = Catalog::from(vec![at_hour(), next_day()]);

        let a = run(&documented, "next day at 9").unwrap();
        let b = run(&reversed, "next day at 9").unwrap();

        assert_eq!(a.time.hour(), 9);
        assert_eq!(b.time.hour(), 0);
        assert_ne!(a.time, b.time);
        assert_eq!(a.text, b.text);
    }

    #[test]
    fn every_occurrence_is_applied_in_order() {
        let catalog = Catalog::from(vec![minutes()]);
        let res = run(&catalog, "for 30 min then for 15 min").unwrap();
        assert_eq!(res.duration, Duration::minutes(45));
        assert_eq!(res.spans, vec![Span::new(0, 10), Span::new(16, 26)]);
        assert_eq!(res.text, "then");
    }

    #[test]
    fn first_only_mode_applies_one_match_per_rule() {
        let catalog = Catalog::from(vec![minutes()]);
        let options = Options { match_mode: MatchMode::First };
        let res = Parser::new("for 30 min then for 15 min", &catalog).run(&context(), &options).unwrap();
        assert_eq!(res.duration, Duration::minutes(30));
        assert_eq!(res.text, "then for 15 min");
    }

    #[test]
    fn time_and_duration_accumulate_independently() {
        let catalog = Catalog::from(vec![minutes(), at_hour(), minutes()]);
        let res = run(&catalog, "at 7 for 10 min").unwrap();
        // The duration rule appears twice in the catalog and applies twice.
        assert_eq!(res.duration, Duration::minutes(20));
        assert_eq!(res.time.hour(), 7);
        assert_eq!(res.text, "");
    }

    #[test]
    fn failing_semantics_abort_the_whole_run() {
        let catalog = Catalog::from(vec![next_day(), minutes()]);
        let err = run(&catalog, "next day for 1.2.3 min").unwrap_err();
        assert!(matches!(err, Error::Capture { ref rule, .. } if rule == "minutes"));
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let mut catalog = Catalog::from(vec![next_day(), at_hour()]);
        catalog.disable("next day");
        let res = run(&catalog, "next day at 9").unwrap();
        assert_eq!(res.time.to_rfc3339(), "2013-02-12T09:00:00+00:00");
        assert_eq!(res.text, "next day");
    }

    #[test]
    fn metrics_record_every_rule_in_catalog_order() {
        let mut catalog = Catalog::from(vec![next_day(), at_hour(), minutes()]);
        catalog.disable("next day");
        let res = Parser::new("lunch at 1", &catalog).run_with_metrics(&context(), &Options::default()).unwrap();
        let metrics = res.metrics.unwrap();

        let statuses: Vec<(&str, PassStatus)> = metrics.passes.iter().map(|p| (p.rule.as_str(), p.status)).collect();
        assert_eq!(
            statuses,
            [("next day", PassStatus::Disabled), ("at hour", PassStatus::Applied(1)), ("minutes", PassStatus::NoMatch)]
        );
    }

    #[test]
    fn rules_missing_a_bucket_are_gated() {
        let catalog = Catalog::from(vec![at_hour()]);
        let res = Parser::new("at noon", &catalog).run_with_metrics(&context(), &Options::default()).unwrap();
        assert_eq!(res.metrics.unwrap().passes[0].status, PassStatus::Gated);
    }

    #[test]
    fn overlapping_matches_from_different_rules_are_removed_once() {
        let wide = rule! {
            name: "wide",
            pattern: r"next day at",
            time: |_ctx, t, _caps| { Ok(t) }
        }
        .unwrap();
        let catalog = Catalog::from(vec![next_day(), wide, at_hour()]);
        let res = run(&catalog, "go next day at 9 now").unwrap();
        assert_eq!(res.text, "go now");
        assert_eq!(res.spans.len(), 3);
    }

    #[test]
    fn runs_are_deterministic() {
        let catalog = Catalog::from(vec![next_day(), at_hour(), minutes()]);
        let a = run(&catalog, "next day at 9 for 2.5 min").unwrap();
        let b = run(&catalog, "next day at 9 for 2.5 min").unwrap();
        assert_eq!((a.time, a.duration, a.text, a.spans), (b.time, b.duration, b.text, b.spans));
    }
}
