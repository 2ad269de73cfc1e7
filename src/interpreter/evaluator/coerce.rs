use std::rc::Rc;

use bigdecimal::BigDecimal;

use crate::{
    ast::Span,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Value, number},
    },
};

impl Context<'_> {
    /// Converts a value to a number.
    ///
    /// Text is parsed, with empty text reading as zero. Arrays and sequences
    /// convert their first element.
    ///
    /// # Errors
    /// `TypeCoercion` if the text is not numeric or the collection is empty.
    pub fn to_number(&mut self, value: &Value, span: Span) -> EvalResult<BigDecimal> {
        match value {
            Value::Number(n) => Ok(n.clone()),
            Value::String(s) => {
                value.as_number()
                     .ok_or_else(|| RuntimeError::TypeCoercion { details: format!("'{s}' is not a number"),
                                                                 span })
            },
            Value::Array(items) => match items.first() {
                Some(first) => self.to_number(first, span),
                None => Err(RuntimeError::TypeCoercion { details: "an empty array is not a number".to_string(),
                                                         span }),
            },
            Value::Sequence(seq) => match seq.at(0, self)? {
                Some(first) => self.to_number(&first, span),
                None => Err(RuntimeError::TypeCoercion { details: "an empty sequence is not a number".to_string(),
                                                         span }),
            },
        }
    }

    /// Converts a value to text.
    ///
    /// Numbers use plain decimal notation. Arrays and sequences convert their
    /// first element, or give the empty string when empty.
    pub fn to_text(&mut self, value: &Value) -> EvalResult<String> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(number::format(n)),
            Value::Array(items) => match items.first() {
                Some(first) => self.to_text(first),
                None => Ok(String::new()),
            },
            Value::Sequence(seq) => match seq.at(0, self)? {
                Some(first) => self.to_text(&first),
                None => Ok(String::new()),
            },
        }
    }

    /// Converts a value to a list of values.
    ///
    /// Text containing a space splits into words, other text into characters.
    /// Numbers split their text form into characters. Finite sequences are
    /// generated in full.
    ///
    /// # Errors
    /// `UnboundedSequence` for an infinite sequence.
    pub fn to_array(&mut self, value: &Value, span: Span) -> EvalResult<Rc<Vec<Value>>> {
        match value {
            Value::Array(items) => Ok(Rc::clone(items)),
            Value::String(s) => Ok(Rc::new(split_text(s))),
            Value::Number(n) => Ok(Rc::new(split_text(&number::format(n)))),
            Value::Sequence(seq) => Ok(Rc::new(seq.to_vec(self, span)?)),
        }
    }

    /// Replaces a finite sequence with the array of its elements so it can be
    /// compared structurally.
    pub(crate) fn settle(&mut self, value: Value, span: Span) -> EvalResult<Value> {
        match value {
            Value::Sequence(seq) if seq.is_finite() => Ok(Value::from(seq.to_vec(self, span)?)),
            other => Ok(other),
        }
    }
}

fn split_text(text: &str) -> Vec<Value> {
    if text.contains(' ') {
        text.split(' ').map(Value::from).collect()
    } else {
        text.chars().map(|c| Value::from(c.to_string())).collect()
    }
}
