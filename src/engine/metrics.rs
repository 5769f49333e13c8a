//! Engine run metrics.
//!
//! A plain `Parser::run` collects nothing. The verbose
//! path records one [`RulePass`] per catalog entry so a caller can see which
//! rules fired, which were skipped and why, and where the time went.

use crate::{RuleKind, Span};
use std::time::Duration;

/// What happened to one rule during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStatus {
    /// The rule matched this many times and every match was applied.
    Applied(usize),
    /// The rule was considered but its pattern did not match.
    NoMatch,
    /// The rule is disabled in the catalog.
    Disabled,
    /// The input lacked a bucket the rule requires.
    Gated,
}

/// Trace of a single rule within a run.
#[derive(Debug, Clone)]
pub struct RulePass {
    /// Rule name.
    pub rule: String,
    /// Which accumulator it feeds.
    pub kind: RuleKind,
    pub status: PassStatus,
    /// Spans matched by this rule, in textual order.
    pub spans: Vec<Span>,
    /// Time spent matching and applying.
    pub duration: Duration,
}

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the run (fold + reduce).
    pub total: Duration,
    /// Time spent building the residual text.
    pub reduce: Duration,
    /// One entry per catalog rule, in catalog order.
    pub passes: Vec<RulePass>,
}
