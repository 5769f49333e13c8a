//! Residual text reconstruction.
//!
//! ```text
//! input:  "block time tomorrow for 2 hours at 3pm"
//! spans:              [-------][-----------][-----]
//! mask:   kkkkkkkkkkkkdddddddddddddddddddddddddddd...
//! kept:   "block time "  -> collapse whitespace, trim -> "block time"
//! ```
//!
//! A byte is dropped if any span covers it, however many do, so overlapping
//! spans from different rules never remove anything twice and the order the
//! spans were found in does not matter.

use crate::Span;

/// Remove every spanned byte from `input`, collapse whitespace runs to a
/// single space and trim.
///
/// Offsets past the end of `input` are clamped. Spans that split a multi-byte
/// character leave a replacement character behind rather than invalid UTF-8.
pub fn reduce(input: &str, spans: &[Span]) -> String {
    let bytes = input.as_bytes();
    let mut keep = vec![true; bytes.len()];

    for span in spans {
        let end = span.end.min(bytes.len());
        let start = span.start.min(end);
        keep[start..end].iter_mut().for_each(|k| *k = false);
    }

    let kept: Vec<u8> = bytes.iter().zip(&keep).filter(|&(_, &k)| k).map(|(&b, _)| b).collect();
    let kept = String::from_utf8_lossy(&kept);

    regex!(r"\s+").replace_all(&kept, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_spans_and_normalizes_whitespace() {
        let input = "block time tomorrow for 2 hours at 3pm";
        let spans = [Span::new(11, 19), Span::new(20, 31), Span::new(32, 38)];
        assert_eq!(reduce(input, &spans), "block time");
    }

    #[test]
    fn overlapping_spans_are_a_union() {
        let input = "abc def ghi";
        let a = reduce(input, &[Span::new(2, 6), Span::new(4, 9)]);
        let b = reduce(input, &[Span::new(2, 9)]);
        assert_eq!(a, b);
        assert_eq!(a, "abhi");
    }

    #[test]
    fn span_order_does_not_matter() {
        let input = "call mom tomorrow at 5 for 1 hour please";
        let spans = [Span::new(9, 17), Span::new(18, 22), Span::new(23, 33)];
        let mut reversed = spans;
        reversed.reverse();
        assert_eq!(reduce(input, &spans), reduce(input, &reversed));
        assert_eq!(reduce(input, &spans), "call mom please");
    }

    #[test]
    fn duplicate_spans_are_idempotent() {
        let input = "x today y";
        let once = reduce(input, &[Span::new(2, 7)]);
        let twice = reduce(input, &[Span::new(2, 7), Span::new(2, 7)]);
        assert_eq!(once, twice);
        assert_eq!(once, "x y");
    }

    #[test]
    fn no_spans_only_normalizes() {
        assert_eq!(reduce("  a \t\n b  ", &[]), "a b");
    }

    #[test]
    fn out_of_range_spans_are_clamped() {
        assert_eq!(reduce("hello world", &[Span::new(5, 100), Span::new(200, 300)]), "hello");
        assert_eq!(reduce("hello", &[Span::new(4, 2)]), "hello");
    }

    #[test]
    fn reducing_the_residual_again_is_stable() {
        let once = reduce("lunch   tomorrow  with   ana", &[Span::new(8, 16)]);
        assert_eq!(once, "lunch with ana");
        assert_eq!(reduce(&once, &[]), once);
    }

    #[test]
    fn multibyte_text_survives_char_aligned_spans() {
        let input = "café tomorrow ☕";
        let start = input.find("tomorrow").unwrap();
        assert_eq!(reduce(input, &[Span::new(start, start + "tomorrow".len())]), "café ☕");
    }
}
