use crate::ast::Number;

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Truncates a number toward zero for the bitwise operators.
///
/// Values outside the `i64` range saturate and NaN becomes `0`, matching the
/// semantics of Rust's float-to-int casts.
///
/// ## Example
/// ```
/// use winzig::util::num::truncate_to_i64;
///
/// assert_eq!(truncate_to_i64(6.9), 6);
/// assert_eq!(truncate_to_i64(-6.9), -6);
/// assert_eq!(truncate_to_i64(f64::NAN), 0);
/// assert_eq!(truncate_to_i64(1e300), i64::MAX);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn truncate_to_i64(value: Number) -> i64 {
    value as i64
}

/// Converts the result of an integer operation back into a number.
///
/// Results beyond `2^53` lose precision, like any large float.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_number(value: i64) -> Number {
    value as Number
}

/// Converts a count (such as a number of printed characters) into a number.
///
/// Counts never come close to [`MAX_SAFE_U64_INT`] in practice; larger values
/// saturate at that bound rather than silently rounding.
///
/// ## Example
/// ```
/// use winzig::util::num::usize_to_number;
///
/// assert_eq!(usize_to_number(9), 9.0);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn usize_to_number(value: usize) -> Number {
    let value = value as u64;
    if value > MAX_SAFE_U64_INT {
        MAX_SAFE_U64_INT as Number
    } else {
        value as Number
    }
}

/// Converts a boolean into the language's truth values `1.0` and `0.0`.
#[must_use]
pub const fn bool_to_number(value: bool) -> Number {
    if value { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_rounds_toward_zero() {
        assert_eq!(truncate_to_i64(2.999), 2);
        assert_eq!(truncate_to_i64(-2.999), -2);
        assert_eq!(truncate_to_i64(f64::NEG_INFINITY), i64::MIN);
    }

    #[test]
    fn counts_saturate_at_the_safe_bound() {
        assert_eq!(usize_to_number(usize::MAX), 9_007_199_254_740_991.0);
    }

    #[test]
    fn booleans_become_one_and_zero() {
        assert_eq!(bool_to_number(true), 1.0);
        assert_eq!(bool_to_number(false), 0.0);
    }
}
