use std::ops::ControlFlow;

use crate::{
    ast::{Block, Node, Span, TEMPLATE_LEFT, TEMPLATE_RIGHT, Template},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a fold.
    ///
    /// Each element of the operand is first passed through `map`, if present.
    /// The results are then combined left to right with `combinator`. Without
    /// a combinator the mapped elements are returned as an array.
    ///
    /// # Errors
    /// `UnboundedSequence` if the operand is an infinite sequence.
    pub(super) fn eval_fold(&mut self,
                            arg: &Node,
                            map: Option<&Block>,
                            combinator: Option<&Template>,
                            span: Span,
                            env: &mut Environment)
                            -> EvalResult<Value> {
        let operand = self.eval(arg, env)?;

        let elements = match (&operand, map) {
            (Value::Sequence(seq), Some(block)) => {
                seq.map(self, span, |ctx, element| ctx.apply_block(block, element, env))?
            },
            (Value::Sequence(_), None) if combinator.is_none() => return Ok(operand.clone()),
            (Value::Sequence(seq), None) => seq.to_vec(self, span)?,
            (other, Some(block)) => {
                let items = self.to_array(other, span)?;
                items.iter()
                     .map(|item| self.apply_block(block, item.clone(), env))
                     .collect::<EvalResult<Vec<_>>>()?
            },
            (other, None) => self.to_array(other, span)?.as_ref().clone(),
        };

        let Some(combinator) = combinator else {
            return Ok(Value::from(elements));
        };

        let mut elements = elements.into_iter();
        let Some(mut accumulator) = elements.next() else {
            return Ok(Value::empty());
        };
        for element in elements {
            accumulator = self.apply_template(combinator, accumulator, element, env)?;
        }
        Ok(accumulator)
    }

    /// Evaluates `$` (keep matching elements) or `$:` (any element matches).
    ///
    /// # Errors
    /// `UnboundedSequence` when the operand is an infinite sequence, for `$:`
    /// as well as `$`.
    pub(super) fn eval_filter(&mut self,
                              any: bool,
                              block: Option<&Block>,
                              arg: &Node,
                              span: Span,
                              env: &mut Environment)
                              -> EvalResult<Value> {
        let Some(block) = block else {
            return Err(RuntimeError::TypeCoercion { details: "a filter needs a block".to_string(),
                                                    span });
        };
        let operand = self.eval(arg, env)?;

        if let Value::Sequence(seq) = &operand {
            if !seq.is_finite() {
                return Err(RuntimeError::UnboundedSequence { action: "filter",
                                                             span });
            }
            if any {
                let mut found = false;
                seq.for_each(self, |ctx, element| {
                       if ctx.apply_block(block, element, env)?.is_truthy() {
                           found = true;
                           return Ok(ControlFlow::Break(()));
                       }
                       Ok(ControlFlow::Continue(()))
                   })?;
                return Ok(Value::from(found));
            }
            let kept = seq.filter(self, span, |ctx, element| {
                              Ok(ctx.apply_block(block, element.clone(), env)?.is_truthy())
                          })?;
            return Ok(Value::from(kept));
        }

        let items = self.to_array(&operand, span)?;
        let mut kept = Vec::new();
        for item in items.iter() {
            if self.apply_block(block, item.clone(), env)?.is_truthy() {
                if any {
                    return Ok(Value::from(true));
                }
                kept.push(item.clone());
            }
        }
        Ok(if any { Value::from(false) } else { Value::from(kept) })
    }

    /// Evaluates `@`: pairs elements at equal positions, or combines them with
    /// `combinator` when one is given. The result is as long as the shorter
    /// operand.
    pub(super) fn eval_zip(&mut self,
                           left: &Value,
                           right: &Value,
                           combinator: Option<&Template>,
                           span: Span,
                           env: &mut Environment)
                           -> EvalResult<Value> {
        let (left, right) = self.zip_operands(left, right, span)?;

        let mut zipped = Vec::with_capacity(left.len().min(right.len()));
        for (l, r) in left.into_iter().zip(right) {
            zipped.push(match combinator {
                            Some(template) => self.apply_template(template, l, r, env)?,
                            None => Value::from(vec![l, r]),
                        });
        }
        Ok(Value::from(zipped))
    }

    /// Brings both zip operands to arrays. An infinite sequence is only
    /// generated as far as the other operand reaches.
    fn zip_operands(&mut self, left: &Value, right: &Value, span: Span) -> EvalResult<(Vec<Value>, Vec<Value>)> {
        let unbounded = |value: &Value| matches!(value, Value::Sequence(seq) if !seq.is_finite());
        match (unbounded(left), unbounded(right)) {
            (true, true) => Err(RuntimeError::UnboundedSequence { action: "zip", span }),
            (true, false) => {
                let r = self.to_array(right, span)?.as_ref().clone();
                let l = self.take(left, r.len(), span)?;
                Ok((l, r))
            },
            (false, true) => {
                let l = self.to_array(left, span)?.as_ref().clone();
                let r = self.take(right, l.len(), span)?;
                Ok((l, r))
            },
            (false, false) => {
                let l = self.to_array(left, span)?.as_ref().clone();
                let r = self.to_array(right, span)?.as_ref().clone();
                Ok((l, r))
            },
        }
    }

    /// The first `count` elements of a collection.
    pub(super) fn take(&mut self, value: &Value, count: usize, span: Span) -> EvalResult<Vec<Value>> {
        match value {
            Value::Sequence(seq) => seq.take(count, self),
            other => Ok(self.to_array(other, span)?.iter().take(count).cloned().collect()),
        }
    }

    /// Evaluates a block with its parameter bound to `value`.
    ///
    /// The block runs in a copy of `env`; afterwards every shared name except
    /// the parameter is merged back.
    pub(super) fn apply_block(&mut self, block: &Block, value: Value, env: &mut Environment) -> EvalResult<Value> {
        let mut scope = env.clone();
        scope.set(block.param.clone(), value);
        let result = self.eval_program(&block.body, &mut scope)?;
        env.merge_from(&scope, &[block.param.as_str()]);
        Ok(result)
    }

    /// Evaluates a fold or zip combinator on two operands.
    pub(super) fn apply_template(&mut self,
                                 template: &Template,
                                 left: Value,
                                 right: Value,
                                 env: &mut Environment)
                                 -> EvalResult<Value> {
        let mut scope = env.clone();
        scope.set(TEMPLATE_LEFT, left);
        scope.set(TEMPLATE_RIGHT, right);
        let result = self.eval(&template.expr, &mut scope)?;
        env.merge_from(&scope, &[TEMPLATE_LEFT, TEMPLATE_RIGHT]);
        Ok(result)
    }
}
