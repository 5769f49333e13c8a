//! Matching and extraction engine.
//!
//! ## How the parts work together
//!
//! ```text
//! input ── TriggerInfo::scan ───┐              (trigger.rs)
//!                               │  buckets
//! catalog (ordered) ────────────┤
//!                               v
//!                     Parser::fold (parser.rs)
//!                       - for each rule, in order
//!                       - skip disabled / gated rules
//!                       - every match -> semantic fn -> accumulator
//!                       - record the match span
//!                               │
//!                               v
//!                     reduce (reduce.rs)
//!                       - drop spanned bytes
//!                       - collapse whitespace
//!                               │
//!                               v
//!                  time, duration, text, spans
//! ```
//!
//! The fold is strictly left to right over the catalog. Rule order is the only
//! disambiguation there is: a rule sees the time/duration already rewritten
//! by every rule before it.
//!
//! ## Responsibilities by module
//!
//! - `trigger.rs`: scans the raw input once to compute coarse buckets used to
//!   skip rules that cannot match.
//! - `parser.rs`: the fold itself.
//! - `reduce.rs`: turns the recorded spans into the residual text.
//! - `metrics.rs`: optional per-rule trace of a run.
//!
//! ## Debugging
//!
//! The engine emits `tracing` events at `debug` (applied matches) and `trace`
//! (skipped rules). Install a subscriber to see them.

#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/reduce.rs"]
mod reduce;
#[path = "engine/trigger.rs"]
mod trigger;

pub use metrics::{PassStatus, RulePass};
pub(crate) use parser::Parser;
pub use reduce::reduce;
pub use trigger::BucketMask;
