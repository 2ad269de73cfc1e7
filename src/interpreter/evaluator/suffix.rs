use bigdecimal::BigDecimal;

use crate::{
    ast::{BaseCode, Extra, Node, Span, SuffixOp},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::{core::Value, number},
    },
};

impl Context<'_> {
    /// Evaluates a suffix operator application.
    pub(super) fn eval_suffix(&mut self,
                              op: SuffixOp,
                              arg: &Node,
                              extra: &Extra,
                              span: Span,
                              env: &mut Environment)
                              -> EvalResult<Value> {
        let value = self.eval(arg, env)?;
        match op {
            SuffixOp::Length => self.length(&value, span),
            SuffixOp::Base => match extra {
                Extra::Base { width, codes } => self.convert_base(value, *width, codes, span),
                _ => Ok(value),
            },
            SuffixOp::Abs => {
                let n = self.to_number(&value, span)?;
                self.number(&n.abs(), span)
            },
            SuffixOp::Lines => Ok(split_on(&self.to_text(&value)?, '\n')),
            SuffixOp::Words => Ok(split_on(&self.to_text(&value)?, ' ')),
            SuffixOp::Head => {
                if let Value::Sequence(seq) = &value {
                    return Ok(seq.at(0, self)?.unwrap_or_else(Value::empty));
                }
                let items = self.to_array(&value, span)?;
                Ok(items.first().cloned().unwrap_or_else(Value::empty))
            },
            SuffixOp::Last => {
                let items = self.to_array(&value, span)?;
                Ok(items.last().cloned().unwrap_or_else(Value::empty))
            },
            SuffixOp::Tail => {
                let items = self.to_array(&value, span)?;
                Ok(Value::from(items.iter().skip(1).cloned().collect::<Vec<_>>()))
            },
            SuffixOp::Init => {
                let items = self.to_array(&value, span)?;
                let keep = items.len().saturating_sub(1);
                Ok(Value::from(items[..keep].to_vec()))
            },
            SuffixOp::Group => self.group(&value, span),
            SuffixOp::IsSquare => {
                let n = self.to_number(&value, span)?;
                Ok(Value::from(number::is_perfect_square(&n)))
            },
            SuffixOp::Flatten => {
                let mut flat = Vec::new();
                self.flatten_into(&value, &mut flat, span)?;
                Ok(Value::from(flat))
            },
        }
    }

    /// `#`: the declared length of a sequence, or the element count of the
    /// value's array form.
    fn length(&mut self, value: &Value, span: Span) -> EvalResult<Value> {
        let length = match value {
            Value::Sequence(seq) => seq.length()
                                       .ok_or(RuntimeError::UnboundedSequence { action: "measure",
                                                                                span })?,
            other => self.to_array(other, span)?.len(),
        };
        Ok(Value::from(BigDecimal::from(length as u64)))
    }

    /// Applies base conversion codes left to right.
    fn convert_base(&mut self, value: Value, width: usize, codes: &[BaseCode], span: Span) -> EvalResult<Value> {
        let mut current = value;
        for code in codes {
            current = match *code {
                BaseCode::Format(radix) => {
                    let n = self.to_number(&current, span)?;
                    Value::from(number::to_radix(&n, radix, width, span)?)
                },
                BaseCode::Parse(radix) => {
                    let text = self.to_text(&current)?;
                    Value::Number(number::from_radix(&text, radix, span)?)
                },
                BaseCode::Decimal => {
                    let n = self.to_number(&current, span)?;
                    self.number(&n, span)?
                },
            };
        }
        Ok(current)
    }

    /// `:@`: groups equal elements, in order of first appearance.
    fn group(&mut self, value: &Value, span: Span) -> EvalResult<Value> {
        let items = self.to_array(value, span)?;
        let mut groups: Vec<Vec<Value>> = Vec::new();
        for item in items.iter() {
            match groups.iter_mut().find(|group| group[0].loose_eq(item)) {
                Some(group) => group.push(item.clone()),
                None => groups.push(vec![item.clone()]),
            }
        }
        Ok(Value::from(groups.into_iter().map(Value::from).collect::<Vec<_>>()))
    }

    fn flatten_into(&mut self, value: &Value, flat: &mut Vec<Value>, span: Span) -> EvalResult<()> {
        match value {
            Value::Array(_) | Value::Sequence(_) => {
                let items = self.to_array(value, span)?;
                for item in items.iter() {
                    self.flatten_into(item, flat, span)?;
                }
            },
            scalar => flat.push(scalar.clone()),
        }
        Ok(())
    }
}

fn split_on(text: &str, separator: char) -> Value {
    Value::from(text.split(separator).map(Value::from).collect::<Vec<_>>())
}
