/// A lazily compiled, process-wide static regex.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`Rule`](crate::Rule), returning `Result<Rule, Error>`.
///
/// ```
/// use tempus::{BucketMask, rule};
///
/// let noon = rule! {
///     name: "noon",
///     pattern: r"\bat noon\b",
///     time: |ctx, _t, _caps| {
///         Ok(ctx.today + chrono::Duration::hours(12))
///     }
/// }
/// .unwrap();
///
/// let minutes = rule! {
///     name: "plus minutes",
///     pattern: r"\+(?P<n>[0-9]+)m",
///     buckets: BucketMask::HAS_DIGITS,
///     duration: |d, caps| {
///         Ok(d + chrono::Duration::minutes(caps.require::<i64>("n")?))
///     }
/// }
/// .unwrap();
/// assert_eq!(noon.name(), "noon");
/// assert_eq!(minutes.buckets(), BucketMask::HAS_DIGITS);
/// ```
#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        pattern: $pat:expr
        $(, case_insensitive: $ci:expr)?
        $(, unicode: $uni:expr)?
        $(, buckets: $buckets:expr)?
        $(, enabled: $enabled:expr)?
        , time: |$ctx:ident, $t:ident, $caps:ident| $body:block
        $(,)?
    ) => {{
        $crate::Rule::builder($name, $pat)
            $(.case_insensitive($ci))?
            $(.unicode($uni))?
            $(.buckets($buckets))?
            $(.enabled($enabled))?
            .time(
                move |$ctx: &$crate::Context,
                      $t: $crate::__chrono::DateTime<$crate::__chrono::FixedOffset>,
                      $caps: &$crate::Captures|
                      -> ::std::result::Result<
                    $crate::__chrono::DateTime<$crate::__chrono::FixedOffset>,
                    $crate::Error,
                > { $body },
            )
    }};
    (
        name: $name:expr,
        pattern: $pat:expr
        $(, case_insensitive: $ci:expr)?
        $(, unicode: $uni:expr)?
        $(, buckets: $buckets:expr)?
        $(, enabled: $enabled:expr)?
        , duration: |$d:ident, $caps:ident| $body:block
        $(,)?
    ) => {{
        $crate::Rule::builder($name, $pat)
            $(.case_insensitive($ci))?
            $(.unicode($uni))?
            $(.buckets($buckets))?
            $(.enabled($enabled))?
            .duration(
                move |$d: $crate::__chrono::Duration,
                      $caps: &$crate::Captures|
                      -> ::std::result::Result<$crate::__chrono::Duration, $crate::Error> { $body },
            )
    }};
}
