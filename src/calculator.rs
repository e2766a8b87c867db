//! The `square` drill: a pure function with a unit test.

/// Returns `n * n`.
///
/// The result is widened to `i128`, so every `i64` input has a representable,
/// non-negative square.
///
/// ```
/// assert_eq!(drills::calculator::square(-4), 16);
/// ```
pub fn square(n: i64) -> i128 {
    let n = i128::from(n);
    n * n
}
