use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_traits::One;

use crate::{
    ast::{Extra, Node, PrefixOp, Span},
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::{core::Value, number},
    },
};

/// Sort key: numbers and numeric text by value, arrays by length, and other
/// text after all numbers.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Number(BigDecimal),
    Text(String),
}

impl Context<'_> {
    /// Evaluates a prefix operator application.
    pub(super) fn eval_prefix(&mut self,
                              op: PrefixOp,
                              arg: &Node,
                              extra: &Extra,
                              span: Span,
                              env: &mut Environment)
                              -> EvalResult<Value> {
        match op {
            PrefixOp::Fold => {
                let (map, combinator) = match extra {
                    Extra::Fold { map, combinator } => (map.as_ref(), combinator.as_ref()),
                    _ => (None, None),
                };
                self.eval_fold(arg, map, combinator, span, env)
            },
            PrefixOp::Filter | PrefixOp::Any => {
                let block = match extra {
                    Extra::Filter(block) => Some(block),
                    _ => None,
                };
                self.eval_filter(op == PrefixOp::Any, block, arg, span, env)
            },
            PrefixOp::Increment | PrefixOp::Decrement => self.eval_step(op, arg, span, env),
            _ => {
                let value = self.eval(arg, env)?;
                self.apply_prefix(op, &value, span)
            },
        }
    }

    fn apply_prefix(&mut self, op: PrefixOp, value: &Value, span: Span) -> EvalResult<Value> {
        match op {
            PrefixOp::Not => Ok(Value::from(!value.is_truthy())),
            PrefixOp::Reverse => Ok(Value::from(self.to_text(value)?.chars().rev().collect::<String>())),
            PrefixOp::Palindrome => {
                let text = self.to_text(value)?;
                let reversed: String = text.chars().rev().collect();
                Ok(Value::from(vec![Value::from(text), Value::from(reversed)]))
            },
            PrefixOp::SortAscending => self.sorted(value, false, span),
            PrefixOp::SortDescending => self.sorted(value, true, span),
            PrefixOp::OneRange => {
                let end = self.to_number(value, span)?;
                self.range(&BigDecimal::one(), &end, true, span)
            },
            _ => {
                let n = self.to_number(value, span)?;
                let result = match op {
                    PrefixOp::Negate => -n,
                    PrefixOp::Floor => number::floor(&n),
                    PrefixOp::Ceil => number::ceil(&n),
                    PrefixOp::Square => &n * &n,
                    PrefixOp::Sqrt => number::sqrt(&n, span)?,
                    PrefixOp::Double => &n * BigDecimal::from(2),
                    PrefixOp::Halve => n / BigDecimal::from(2),
                    _ => n,
                };
                self.number(&result, span)
            },
        }
    }

    /// Evaluates `++` and `--`. Arrays step every element. When the operand
    /// is a variable, the stepped value is stored back into it.
    fn eval_step(&mut self, op: PrefixOp, arg: &Node, span: Span, env: &mut Environment) -> EvalResult<Value> {
        let delta = if op == PrefixOp::Increment { BigDecimal::one() } else { -BigDecimal::one() };
        let current = self.eval(arg, env)?;

        let stepped = match &current {
            Value::Array(items) => {
                let stepped = items.iter()
                                   .map(|item| {
                                       let n = self.to_number(item, span)?;
                                       self.number(&(n + &delta), span)
                                   })
                                   .collect::<EvalResult<Vec<_>>>()?;
                Value::from(stepped)
            },
            other => {
                let n = self.to_number(other, span)?;
                self.number(&(n + &delta), span)?
            },
        };

        if let Node::Variable { name, .. } = arg {
            env.set(name.clone(), stepped.clone());
        }
        Ok(stepped)
    }

    /// Sorts the elements of a collection, keeping the original order of equal
    /// elements.
    fn sorted(&mut self, value: &Value, descending: bool, span: Span) -> EvalResult<Value> {
        let items = self.to_array(value, span)?;
        let mut keyed: Vec<(SortKey, Value)> = items.iter().map(|item| (sort_key(item), item.clone())).collect();
        keyed.sort_by(|(a, _), (b, _)| if descending { b.cmp(a) } else { a.cmp(b) });
        Ok(Value::from(keyed.into_iter().map(|(_, item)| item).collect::<Vec<_>>()))
    }

    /// Numbers from `start` in steps of one up to `end`.
    pub(super) fn range(&self,
                        start: &BigDecimal,
                        end: &BigDecimal,
                        inclusive: bool,
                        span: Span)
                        -> EvalResult<Value> {
        let mut items = Vec::new();
        let mut current = start.clone();
        loop {
            match current.cmp(end) {
                Ordering::Less => {},
                Ordering::Equal if inclusive => {},
                _ => break,
            }
            items.push(self.number(&current, span)?);
            current += BigDecimal::one();
        }
        Ok(Value::from(items))
    }
}

fn sort_key(value: &Value) -> SortKey {
    match value {
        Value::Array(items) => SortKey::Number(BigDecimal::from(items.len() as u64)),
        Value::Sequence(seq) => SortKey::Number(BigDecimal::from(seq.length().unwrap_or(usize::MAX) as u64)),
        Value::Number(n) => SortKey::Number(n.clone()),
        Value::String(s) if s.trim().is_empty() => SortKey::Text(s.clone()),
        Value::String(s) => value.as_number().map_or_else(|| SortKey::Text(s.clone()), SortKey::Number),
    }
}
