use std::{fmt, rc::Rc};

use bigdecimal::BigDecimal;
use num_traits::{One, Zero};

use crate::{
    interpreter::{sequence::Sequence, value::number},
    util::num::parse_numeral,
};

/// Represents a runtime value in the interpreter.
///
/// Booleans are represented by the numbers `1` and `0`.
#[derive(Debug, Clone)]
pub enum Value {
    /// Text.
    String(String),
    /// An arbitrary-precision decimal.
    Number(BigDecimal),
    /// A finite, fully evaluated list of values.
    Array(Rc<Vec<Self>>),
    /// A lazily generated, possibly infinite list.
    Sequence(Rc<Sequence>),
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Self::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(BigDecimal::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Number(if v { BigDecimal::one() } else { BigDecimal::zero() })
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl From<Sequence> for Value {
    fn from(v: Sequence) -> Self {
        Self::Sequence(Rc::new(v))
    }
}

impl Value {
    /// The empty string, used for absent results.
    #[must_use]
    pub const fn empty() -> Self {
        Self::String(String::new())
    }

    /// Returns `true` if the value counts as true in a condition.
    ///
    /// Numbers are true when non-zero, text and arrays when non-empty.
    /// Sequences are always true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::String(s) => !s.is_empty(),
            Self::Number(n) => !n.is_zero(),
            Self::Array(items) => !items.is_empty(),
            Self::Sequence(_) => true,
        }
    }

    /// Returns the numeric value of a number or of numeric text.
    #[must_use]
    pub fn as_number(&self) -> Option<BigDecimal> {
        match self {
            Self::Number(n) => Some(n.clone()),
            Self::String(s) if s.trim().is_empty() => Some(BigDecimal::zero()),
            Self::String(s) => s.trim()
                                .parse()
                                .ok()
                                .or_else(|| parse_numeral(s.trim()))
                                .filter(number::in_range),
            _ => None,
        }
    }

    /// Structural equality in which a number equals text spelling the same
    /// number.
    ///
    /// # Example
    /// ```
    /// use arn::interpreter::value::core::Value;
    ///
    /// assert!(Value::from(12).loose_eq(&Value::from("12")));
    /// assert!(Value::from(vec![Value::from(1), Value::from("a")])
    ///     .loose_eq(&Value::from(vec![Value::from("1"), Value::from("a")])));
    /// assert!(!Value::from("a").loose_eq(&Value::from(0)));
    /// ```
    #[must_use]
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Number(n), s @ Self::String(_)) | (s @ Self::String(_), Self::Number(n)) => {
                s.as_number().is_some_and(|m| &m == n)
            },
            (Self::Array(a), Self::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.loose_eq(y))
            },
            (Self::Sequence(a), Self::Sequence(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Inline form: arrays are space separated and nested arrays are bracketed.
/// Sequences show the elements generated so far.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => f.write_str(&number::format(n)),
            Self::Array(items) => write_inline(f, items),
            Self::Sequence(seq) => {
                write_inline(f, &seq.computed())?;
                f.write_str(" ...")
            },
        }
    }
}

fn write_inline(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        match item {
            Value::Array(_) | Value::Sequence(_) => write!(f, "[{item}]")?,
            _ => write!(f, "{item}")?,
        }
    }
    Ok(())
}
