use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

use crate::{ast::Span, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Extra digits carried through repeated multiplication before the final
/// rounding.
const GUARD_DIGITS: u64 = 5;

/// Largest decimal exponent a number may reach. Results beyond it are an
/// error, and results below its negation underflow to zero.
pub const MAX_EXPONENT: i64 = 100_000;

const TOO_LARGE: &str = "Number is too large";

/// Rounds `value` to `precision` significant digits and strips trailing zeros.
/// A precision of zero keeps one digit.
#[must_use]
pub fn round(value: &BigDecimal, precision: u64) -> BigDecimal {
    if value.is_zero() {
        return BigDecimal::zero();
    }
    value.with_prec(precision.max(1)).normalized()
}

/// Decimal exponent just above the leading digit, so `1` has magnitude 1
/// and `0.05` has magnitude -1.
fn magnitude(value: &BigDecimal) -> i64 {
    if value.is_zero() {
        return 0;
    }
    let (_, scale) = value.as_bigint_and_exponent();
    i64::try_from(value.digits()).unwrap_or(i64::MAX).saturating_sub(scale)
}

/// Returns `true` if `value` lies within the exponent range numbers may take.
///
/// # Example
/// ```
/// use arn::interpreter::value::number::in_range;
/// use bigdecimal::BigDecimal;
///
/// assert!(in_range(&"1e500".parse::<BigDecimal>().unwrap()));
/// assert!(!in_range(&"1e999999999".parse::<BigDecimal>().unwrap()));
/// assert!(!in_range(&"1e-999999999".parse::<BigDecimal>().unwrap()));
/// ```
#[must_use]
pub fn in_range(value: &BigDecimal) -> bool {
    magnitude(value).abs() <= MAX_EXPONENT
}

/// Keeps an arithmetic result within the exponent range.
///
/// # Errors
/// `Arithmetic` if the result is too large. Results too small to represent
/// become zero.
pub fn bounded(value: BigDecimal, span: Span) -> EvalResult<BigDecimal> {
    match magnitude(&value) {
        m if m > MAX_EXPONENT => Err(RuntimeError::Arithmetic { details: TOO_LARGE,
                                                                span }),
        m if m < -MAX_EXPONENT => Ok(BigDecimal::zero()),
        _ => Ok(value),
    }
}

/// Formats a number in plain decimal notation, without exponent and without
/// trailing zeros.
///
/// # Example
/// ```
/// use arn::interpreter::value::number::format;
/// use bigdecimal::BigDecimal;
///
/// assert_eq!(format(&"1e3".parse::<BigDecimal>().unwrap()), "1000");
/// assert_eq!(format(&"-0.0500".parse::<BigDecimal>().unwrap()), "-0.05");
/// assert_eq!(format(&"1.5e-30".parse::<BigDecimal>().unwrap()), format!("0.{}15", "0".repeat(29)));
/// ```
#[must_use]
pub fn format(value: &BigDecimal) -> String {
    let normalized = value.normalized();
    let (digits, scale) = normalized.as_bigint_and_exponent();
    if scale <= 0 {
        return normalized.with_scale(0).as_bigint_and_exponent().0.to_string();
    }

    let sign = if digits.is_negative() { "-" } else { "" };
    let mut magnitude = digits.abs().to_string();
    let scale = usize::try_from(scale).unwrap_or(usize::MAX);
    if magnitude.len() <= scale {
        magnitude.insert_str(0, &"0".repeat(scale - magnitude.len() + 1));
    }
    let point = magnitude.len() - scale;
    format!("{sign}{}.{}", &magnitude[..point], &magnitude[point..])
}

/// Rounds toward negative infinity.
#[must_use]
pub fn floor(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(0, RoundingMode::Floor)
}

/// Rounds toward positive infinity.
#[must_use]
pub fn ceil(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(0, RoundingMode::Ceiling)
}

/// Divides, failing on a zero divisor.
pub fn divide(left: &BigDecimal, right: &BigDecimal, span: Span) -> EvalResult<BigDecimal> {
    if right.is_zero() {
        return Err(RuntimeError::Arithmetic { details: "Division by zero",
                                              span });
    }
    Ok(left / right)
}

/// Mathematical modulo: the result takes the sign of the divisor.
///
/// # Example
/// ```
/// use arn::{ast::Span, interpreter::value::number::modulo};
/// use bigdecimal::BigDecimal;
///
/// let r = modulo(&BigDecimal::from(-7), &BigDecimal::from(3), Span::default()).unwrap();
/// assert_eq!(r, BigDecimal::from(2));
/// ```
pub fn modulo(left: &BigDecimal, right: &BigDecimal, span: Span) -> EvalResult<BigDecimal> {
    if right.is_zero() {
        return Err(RuntimeError::Arithmetic { details: "Modulo by zero",
                                              span });
    }
    let remainder = left % right;
    if !remainder.is_zero() && remainder.is_negative() != right.is_negative() {
        Ok(remainder + right)
    } else {
        Ok(remainder)
    }
}

/// Raises `base` to `exponent`.
///
/// Whole exponents use exponentiation by squaring at `precision` digits plus a
/// few guard digits. Fractional exponents go through `f64`.
pub fn power(base: &BigDecimal,
             exponent: &BigDecimal,
             precision: u64,
             span: Span)
             -> EvalResult<BigDecimal> {
    let working = precision + GUARD_DIGITS;

    if exponent.is_integer()
       && let Some(mut n) = exponent.to_i64()
    {
        let invert = n < 0;
        n = n.saturating_abs();
        let mut result = BigDecimal::one();
        let mut factor = base.clone();
        while n > 0 {
            if n & 1 == 1 {
                result = (&result * &factor).with_prec(working);
            }
            n >>= 1;
            if n > 0 {
                factor = (&factor * &factor).with_prec(working);
                let m = magnitude(&factor);
                if m > MAX_EXPONENT {
                    return if invert {
                        Ok(BigDecimal::zero())
                    } else {
                        Err(RuntimeError::Arithmetic { details: TOO_LARGE,
                                                       span })
                    };
                }
                if m < -MAX_EXPONENT {
                    return if invert {
                        Err(RuntimeError::Arithmetic { details: TOO_LARGE,
                                                       span })
                    } else {
                        Ok(BigDecimal::zero())
                    };
                }
            }
        }
        return if invert { divide(&BigDecimal::one(), &result, span) } else { Ok(result) };
    }

    let approximate = base.to_f64()
                          .zip(exponent.to_f64())
                          .map(|(b, e)| b.powf(e))
                          .and_then(BigDecimal::from_f64);
    approximate.ok_or(RuntimeError::Arithmetic { details: "Power has no real result",
                                                 span })
}

/// Square root, failing for negative input.
pub fn sqrt(value: &BigDecimal, span: Span) -> EvalResult<BigDecimal> {
    value.sqrt()
         .ok_or(RuntimeError::Arithmetic { details: "Square root of a negative number",
                                           span })
}

/// Returns `true` if `value` is the square of a whole number.
#[must_use]
pub fn is_perfect_square(value: &BigDecimal) -> bool {
    if !value.is_integer() || value.is_negative() {
        return false;
    }
    let (whole, _) = value.with_scale(0).as_bigint_and_exponent();
    let root = whole.sqrt();
    &root * &root == whole
}

/// Writes a whole number in `radix`, left-padded with zeros to `width`.
///
/// # Example
/// ```
/// use arn::{ast::Span, interpreter::value::number::to_radix};
/// use bigdecimal::BigDecimal;
///
/// assert_eq!(to_radix(&BigDecimal::from(5), 2, 8, Span::default()).unwrap(), "00000101");
/// assert_eq!(to_radix(&BigDecimal::from(255), 16, 0, Span::default()).unwrap(), "ff");
/// ```
pub fn to_radix(value: &BigDecimal, radix: u32, width: usize, span: Span) -> EvalResult<String> {
    if !value.is_integer() {
        return Err(RuntimeError::TypeCoercion { details: format!("cannot write {} in base {radix}",
                                                                 format(value)),
                                                span });
    }
    let (whole, _) = value.with_scale(0).as_bigint_and_exponent();
    let digits = whole.abs().to_str_radix(radix);
    let sign = if whole.is_negative() { "-" } else { "" };
    Ok(format!("{sign}{digits:0>width$}"))
}

/// Reads a whole number written in `radix`.
pub fn from_radix(text: &str, radix: u32, span: Span) -> EvalResult<BigDecimal> {
    BigInt::parse_bytes(text.trim().as_bytes(), radix).map(BigDecimal::from)
                                                      .ok_or_else(|| RuntimeError::TypeCoercion {
                                                          details: format!("'{text}' is not a base {radix} number"),
                                                          span,
                                                      })
}
