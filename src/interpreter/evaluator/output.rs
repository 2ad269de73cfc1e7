use crate::{
    ast::Span,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Renders a value the way it is printed.
    ///
    /// A top-level array or sequence prints one element per line. Elements that
    /// are collections print inline, space separated, with deeper collections
    /// in brackets. Finite sequences are generated in full first.
    ///
    /// # Errors
    /// `UnboundedSequence` if the value is or contains an infinite sequence.
    pub(crate) fn serialize(&mut self, value: &Value, span: Span) -> EvalResult<String> {
        let settled = self.settle_deep(value, span)?;
        Ok(match &settled {
            Value::Array(items) => items.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n"),
            scalar => scalar.to_string(),
        })
    }

    /// Replaces every sequence in `value` with the array of its elements.
    fn settle_deep(&mut self, value: &Value, span: Span) -> EvalResult<Value> {
        let items = match value {
            Value::Sequence(seq) if !seq.is_finite() => {
                return Err(RuntimeError::UnboundedSequence { action: "print",
                                                             span });
            },
            Value::Sequence(seq) => seq.to_vec(self, span)?,
            Value::Array(items) => items.as_ref().clone(),
            scalar => return Ok(scalar.clone()),
        };
        let settled = items.iter()
                           .map(|item| self.settle_deep(item, span))
                           .collect::<EvalResult<Vec<_>>>()?;
        Ok(Value::from(settled))
    }
}
