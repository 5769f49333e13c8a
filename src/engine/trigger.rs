//! Trigger scanning (input pre-classification).
//!
//! The input is inspected once per parse to produce a [`BucketMask`] of cheap
//! boolean features. A rule that declares buckets is skipped when the input
//! lacks any of them.
//!
//! Buckets must only ever be *necessary* conditions for a rule's pattern. A
//! false positive here costs one regex scan; a false negative would silently
//! drop a match, so the scan errs on the side of setting bits.
//!
//! The scan is ASCII. A rule gated on `MONTHISH` must be built with
//! `unicode(false)`, or case folding lets it match text the scan never flags.

bitflags::bitflags! {
    /// Coarse buckets for fast input classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BucketMask: u32 {
        /// At least one ASCII digit.
        const HAS_DIGITS    = 1 << 0;
        /// Contains a three-letter English month prefix (any case).
        const MONTHISH      = 1 << 1;
        /// At least one ASCII upper-case letter.
        const HAS_UPPERCASE = 1 << 2;
    }
}

const MONTH_PREFIXES: [&str; 12] = ["jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"];

/// Input characteristics detected from the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TriggerInfo {
    pub buckets: BucketMask,
}

impl TriggerInfo {
    /// Scan `input` for coarse buckets.
    ///
    /// Uses ASCII lowercasing: month names are ASCII English. A locale whose
    /// rules need other buckets should extend the scan, not reinterpret these.
    pub fn scan(input: &str) -> Self {
        let mut buckets = BucketMask::empty();

        if input.bytes().any(|b| b.is_ascii_digit()) {
            buckets |= BucketMask::HAS_DIGITS;
        }

        if input.bytes().any(|b| b.is_ascii_uppercase()) {
            buckets |= BucketMask::HAS_UPPERCASE;
        }

        let lower = input.to_ascii_lowercase();
        if MONTH_PREFIXES.iter().any(|m| lower.contains(m)) {
            buckets |= BucketMask::MONTHISH;
        }

        TriggerInfo { buckets }
    }

    /// True when every bucket in `required` was seen.
    pub fn satisfies(&self, required: BucketMask) -> bool {
        self.buckets.contains(required)
    }
}
