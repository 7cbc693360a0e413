use crate::{
    ast::{BinaryOperator, Number},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
    util::num::{bool_to_number, i64_to_number, truncate_to_i64},
};

/// Applies a non-assigning binary operator to two evaluated operands.
///
/// Arithmetic follows IEEE 754, so dividing by zero yields an infinity or
/// NaN rather than an error. `&` and `|` work on the operands truncated
/// toward zero. Comparisons yield `1` or `0`.
///
/// ## Example
/// ```
/// use winzig::{ast::BinaryOperator, interpreter::evaluator::binary::apply_binary};
///
/// assert_eq!(apply_binary(BinaryOperator::Rem, 7.5, 2.0, 1), Ok(1.5));
/// assert_eq!(apply_binary(BinaryOperator::BitOr, 5.9, 2.0, 1), Ok(7.0));
/// assert_eq!(apply_binary(BinaryOperator::GreaterEqual, 2.0, 2.0, 1), Ok(1.0));
/// assert!(apply_binary(BinaryOperator::Not, 1.0, 2.0, 1).is_err());
/// ```
///
/// # Errors
/// [`RuntimeError::UnknownOperator`] for `!` and for the assignment
/// operators, which the evaluator handles before operands are evaluated.
#[allow(clippy::float_cmp)]
pub fn apply_binary(op: BinaryOperator, a: Number, b: Number, line: usize) -> EvalResult<Number> {
    use BinaryOperator::{
        Add, BitAnd, BitOr, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual,
        Pow, Rem, Sub,
    };

    Ok(match op {
        Add => a + b,
        Sub => a - b,
        Mul => a * b,
        Div => a / b,
        Rem => a % b,
        Pow => a.powf(b),
        BitAnd => i64_to_number(truncate_to_i64(a) & truncate_to_i64(b)),
        BitOr => i64_to_number(truncate_to_i64(a) | truncate_to_i64(b)),
        Less => bool_to_number(a < b),
        Greater => bool_to_number(a > b),
        LessEqual => bool_to_number(a <= b),
        GreaterEqual => bool_to_number(a >= b),
        Equal => bool_to_number(a == b),
        NotEqual => bool_to_number(a != b),
        _ => {
            return Err(RuntimeError::UnknownOperator { operator: op.symbol().to_string(),
                                                       line });
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_by_zero_follows_floating_point() {
        assert_eq!(apply_binary(BinaryOperator::Div, 1.0, 0.0, 1), Ok(f64::INFINITY));
        assert!(apply_binary(BinaryOperator::Rem, 1.0, 0.0, 1).unwrap().is_nan());
    }

    #[test]
    fn bitwise_operators_truncate_toward_zero() {
        assert_eq!(apply_binary(BinaryOperator::BitAnd, 6.9, 3.2, 1), Ok(2.0));
        assert_eq!(apply_binary(BinaryOperator::BitOr, -1.5, 0.0, 1), Ok(-1.0));
    }

    #[test]
    fn comparisons_yield_truth_values() {
        assert_eq!(apply_binary(BinaryOperator::Less, 1.0, 2.0, 1), Ok(1.0));
        assert_eq!(apply_binary(BinaryOperator::Greater, 1.0, 2.0, 1), Ok(0.0));
        assert_eq!(apply_binary(BinaryOperator::LessEqual, 2.0, 2.0, 1), Ok(1.0));
        assert_eq!(apply_binary(BinaryOperator::Equal, 0.1 + 0.2, 0.3, 1), Ok(0.0));
        assert_eq!(apply_binary(BinaryOperator::NotEqual, 1.0, 2.0, 1), Ok(1.0));
    }

    #[test]
    fn assignment_operators_are_not_applied_here() {
        let error = apply_binary(BinaryOperator::AddAssign, 1.0, 2.0, 4).unwrap_err();
        assert_eq!(error,
                   RuntimeError::UnknownOperator { operator: "+=".to_string(),
                                                   line:     4, });
    }
}
