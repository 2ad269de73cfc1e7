use std::cmp::Ordering;

use bigdecimal::BigDecimal;

use crate::{
    ast::{Extra, InfixOp, Node, Span},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::{core::Value, number},
    },
    util::num::{to_count, to_i64_checked},
};

impl Context<'_> {
    /// Evaluates an infix operator application.
    ///
    /// Assignment and removal need the unevaluated variable on the left, and
    /// `&&`/`||` only evaluate their right operand when needed. Every other
    /// operator evaluates both operands left to right first.
    pub(super) fn eval_infix(&mut self,
                             op: InfixOp,
                             left: &Node,
                             right: &Node,
                             extra: &Extra,
                             span: Span,
                             env: &mut Environment)
                             -> EvalResult<Value> {
        match op {
            InfixOp::Assign => self.eval_assign(left, right, env),
            InfixOp::Remove => self.eval_remove(left, right, span, env),
            InfixOp::And | InfixOp::Or => {
                let first = self.eval(left, env)?;
                if first.is_truthy() == (op == InfixOp::And) {
                    self.eval(right, env)
                } else {
                    Ok(first)
                }
            },
            InfixOp::Call => {
                let receiver = self.eval(left, env)?;
                match right {
                    Node::Call { name, args, span } => self.eval_call(name, args, Some(receiver), *span, env),
                    other => self.eval(other, env),
                }
            },
            InfixOp::Zip => {
                let (l, r) = self.eval_operands(left, right, env)?;
                let template = match extra {
                    Extra::Zip(template) => Some(template),
                    _ => None,
                };
                self.eval_zip(&l, &r, template, span, env)
            },
            _ => {
                let (l, r) = self.eval_operands(left, right, env)?;
                self.apply_infix(op, &l, &r, span)
            },
        }
    }

    fn eval_operands(&mut self, left: &Node, right: &Node, env: &mut Environment) -> EvalResult<(Value, Value)> {
        let l = self.eval(left, env)?;
        let r = self.eval(right, env)?;
        Ok((l, r))
    }

    /// Applies an operator whose operands are both already evaluated.
    pub(super) fn apply_infix(&mut self, op: InfixOp, l: &Value, r: &Value, span: Span) -> EvalResult<Value> {
        match op {
            InfixOp::Power if matches!(l, Value::String(_)) => {
                let times = self.to_number(r, span)?;
                let text = self.to_text(l)?;
                Ok(Value::from(text.repeat(to_count(&times, span)?)))
            },
            InfixOp::Power
            | InfixOp::Multiply
            | InfixOp::Divide
            | InfixOp::Modulo
            | InfixOp::Add
            | InfixOp::Subtract => {
                let a = self.to_number(l, span)?;
                let b = self.to_number(r, span)?;
                let result = match op {
                    InfixOp::Power => number::power(&a, &b, self.precision, span)?,
                    InfixOp::Multiply => a * b,
                    InfixOp::Divide => number::divide(&a, &b, span)?,
                    InfixOp::Modulo => number::modulo(&a, &b, span)?,
                    InfixOp::Add => a + b,
                    _ => a - b,
                };
                self.number(&result, span)
            },
            InfixOp::Join => {
                let separator = self.to_text(r)?;
                if let Value::Sequence(seq) = l {
                    return Ok(Value::from(seq.join(&separator, self, span)?));
                }
                let items = self.to_array(l, span)?;
                let texts = items.iter().map(|item| self.to_text(item)).collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(texts.join(&separator)))
            },
            InfixOp::Split => {
                let text = self.to_text(l)?;
                let separator = self.to_text(r)?;
                let parts: Vec<Value> = if separator.is_empty() {
                    text.chars().map(|c| Value::from(c.to_string())).collect()
                } else {
                    text.split(separator.as_str()).map(Value::from).collect()
                };
                Ok(Value::from(parts))
            },
            InfixOp::Concat => {
                let mut text = self.to_text(l)?;
                text.push_str(&self.to_text(r)?);
                Ok(Value::from(text))
            },
            InfixOp::Range | InfixOp::ClosedRange => {
                let start = self.to_number(l, span)?;
                let end = self.to_number(r, span)?;
                self.range(&start, &end, op == InfixOp::ClosedRange, span)
            },
            InfixOp::Index => self.index(l, r, span),
            InfixOp::IndexOf => {
                let items = self.to_array(l, span)?;
                let position = items.iter().position(|item| item.loose_eq(r));
                Ok(position.map_or_else(|| Value::from(-1), |i| Value::from(BigDecimal::from(i as u64))))
            },
            InfixOp::Contains => {
                let items = self.to_array(l, span)?;
                Ok(Value::from(items.iter().any(|item| item.loose_eq(r))))
            },
            InfixOp::Equal | InfixOp::NotEqual => {
                let a = self.settle(l.clone(), span)?;
                let b = self.settle(r.clone(), span)?;
                Ok(Value::from(a.loose_eq(&b) == (op == InfixOp::Equal)))
            },
            InfixOp::Less | InfixOp::LessEqual | InfixOp::Greater | InfixOp::GreaterEqual => {
                let a = self.to_number(l, span)?;
                let b = self.to_number(r, span)?;
                let ordering = a.cmp(&b);
                let holds = match op {
                    InfixOp::Less => ordering == Ordering::Less,
                    InfixOp::LessEqual => ordering != Ordering::Greater,
                    InfixOp::Greater => ordering == Ordering::Greater,
                    _ => ordering != Ordering::Less,
                };
                Ok(Value::from(holds))
            },
            InfixOp::Assign | InfixOp::Remove | InfixOp::And | InfixOp::Or | InfixOp::Call | InfixOp::Zip => {
                Err(RuntimeError::TypeCoercion { details: format!("'{op}' needs unevaluated operands"),
                                                 span })
            },
        }
    }

    /// `name : value` stores the value and returns it.
    fn eval_assign(&mut self, target: &Node, value: &Node, env: &mut Environment) -> EvalResult<Value> {
        let Node::Variable { name, .. } = target else {
            return Err(RuntimeError::ImmutableTarget { op:   InfixOp::Assign.spelling(),
                                                       span: target.span(), });
        };
        let value = self.eval(value, env)?;
        env.set(name.clone(), value.clone());
        Ok(value)
    }

    /// `name @: value` removes the first element equal to `value` from the
    /// collection stored in `name`.
    fn eval_remove(&mut self, target: &Node, value: &Node, span: Span, env: &mut Environment) -> EvalResult<Value> {
        let Node::Variable { name, span: name_span } = target else {
            return Err(RuntimeError::ImmutableTarget { op: InfixOp::Remove.spelling(),
                                                       span });
        };
        let current = env.get(name, *name_span)?;
        let unwanted = self.eval(value, env)?;
        let mut items = self.to_array(&current, span)?.as_ref().clone();
        if let Some(index) = items.iter().position(|item| item.loose_eq(&unwanted)) {
            items.remove(index);
        }
        let updated = Value::from(items);
        env.set(name.clone(), updated.clone());
        Ok(updated)
    }

    /// `collection ? index`. Negative indices count from the end; indices out
    /// of range give the empty string.
    fn index(&mut self, collection: &Value, index: &Value, span: Span) -> EvalResult<Value> {
        let index = self.to_number(index, span)?;
        let index = to_i64_checked(&index, span)?;

        if let Value::Sequence(seq) = collection {
            let resolved = if index < 0 {
                match seq.length() {
                    Some(length) => resolve_index(index, length),
                    None => {
                        return Err(RuntimeError::UnboundedSequence { action: "index from the end of",
                                                                     span });
                    },
                }
            } else {
                usize::try_from(index).ok()
            };
            return Ok(match resolved {
                Some(i) => seq.at(i, self)?.unwrap_or_else(Value::empty),
                None => Value::empty(),
            });
        }

        let items = self.to_array(collection, span)?;
        Ok(resolve_index(index, items.len()).and_then(|i| items.get(i).cloned())
                                            .unwrap_or_else(Value::empty))
    }
}

fn resolve_index(index: i64, length: usize) -> Option<usize> {
    if index < 0 {
        length.checked_sub(usize::try_from(index.unsigned_abs()).ok()?)
    } else {
        usize::try_from(index).ok()
    }
}
