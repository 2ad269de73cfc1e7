use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::{Signed, ToPrimitive};

use crate::{ast::Span, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Converts a numeral as written in source text into a decimal.
///
/// Source numerals use `_` as the minus sign, both in front of the number and
/// in the exponent, and allow a bare exponent such as `e3` as shorthand for
/// `1e3`.
///
/// ## Parameters
/// - `text`: The numeral exactly as the lexer produced it.
///
/// ## Returns
/// - `Some(BigDecimal)`: The value of the numeral.
/// - `None`: If the text is not a numeral.
///
/// ## Example
/// ```
/// use arn::util::num::parse_numeral;
/// use bigdecimal::BigDecimal;
///
/// assert_eq!(parse_numeral("_12"), Some(BigDecimal::from(-12)));
/// assert_eq!(parse_numeral("e3"), Some(BigDecimal::from(1000)));
/// assert_eq!(parse_numeral("2e_1"), "0.2".parse().ok());
/// assert_eq!(parse_numeral("abc"), None);
/// ```
#[must_use]
pub fn parse_numeral(text: &str) -> Option<BigDecimal> {
    let (negative, digits) = match text.strip_prefix('_') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let mut normalized = String::with_capacity(digits.len() + 2);
    if negative {
        normalized.push('-');
    }
    if digits.starts_with('e') {
        normalized.push('1');
    }
    normalized.push_str(&digits.replace("e_", "e-"));
    BigDecimal::from_str(&normalized).ok()
}

/// Converts a decimal to an `i64`, requiring it to be a whole number in range.
///
/// ## Errors
/// Returns a `TypeCoercion` error if the value is fractional or does not fit.
///
/// ## Example
/// ```
/// use arn::{ast::Span, util::num::to_i64_checked};
/// use bigdecimal::BigDecimal;
///
/// assert_eq!(to_i64_checked(&BigDecimal::from(-7), Span::default()).unwrap(), -7);
/// assert!(to_i64_checked(&"1.5".parse().unwrap(), Span::default()).is_err());
/// ```
pub fn to_i64_checked(value: &BigDecimal, span: Span) -> EvalResult<i64> {
    if !value.is_integer() {
        return Err(RuntimeError::TypeCoercion { details: format!("expected a whole number, found {value}"),
                                                span });
    }
    value.to_i64()
         .ok_or_else(|| RuntimeError::TypeCoercion { details: format!("{value} is too large"),
                                                     span })
}

/// Converts a decimal to a `usize` count or index.
///
/// Fractional values are truncated toward zero and negative values clamp to
/// zero, matching how counts behave in string repetition and `take`.
///
/// ## Errors
/// Returns a `TypeCoercion` error if the value is too large to be a count.
pub fn to_count(value: &BigDecimal, span: Span) -> EvalResult<usize> {
    let whole = value.with_scale(0);
    if whole.is_negative() {
        return Ok(0);
    }
    whole.to_usize()
         .ok_or_else(|| RuntimeError::TypeCoercion { details: format!("{value} is too large to count with"),
                                                     span })
}
