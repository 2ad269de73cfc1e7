use tracing::trace;

use crate::{
    ast::{Hook, IMPLICIT, Node, Span},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::to_count,
};

impl Context<'_> {
    /// Evaluates a function call.
    ///
    /// Arguments are evaluated in the caller's scope, left to right, after the
    /// `receiver` of a `.` call. The body then runs in a copy of the caller's
    /// scope with the parameters bound. Afterwards every shared name except
    /// the parameters is merged back into the caller.
    ///
    /// # Parameters
    /// - `name`: Function name.
    /// - `args`: Argument expressions written at the call site.
    /// - `receiver`: Left operand of a `.` call, passed as the first argument.
    /// - `span`: Position of the call for error reporting.
    /// - `env`: The caller's scope.
    ///
    /// # Errors
    /// - `UnboundName` if no function of that name is in scope.
    /// - `ArityMismatch` if the definition in scope takes a different number
    ///   of arguments.
    pub(crate) fn eval_call(&mut self,
                            name: &str,
                            args: &[Node],
                            receiver: Option<Value>,
                            span: Span,
                            env: &mut Environment)
                            -> EvalResult<Value> {
        let mut values = Vec::with_capacity(args.len() + 1);
        values.extend(receiver);
        for arg in args {
            values.push(self.eval(arg, env)?);
        }

        let function = env.get_function(name, span)?;
        if function.params.len() != values.len() {
            return Err(RuntimeError::ArityMismatch { name: name.to_string(),
                                                     expected: function.params.len(),
                                                     found: values.len(),
                                                     span });
        }

        trace!(name, arity = values.len(), "calling function");

        let mut scope = env.clone();
        for (param, value) in function.params.iter().zip(values) {
            scope.set(param.clone(), value);
        }
        let result = self.eval(&function.body, &mut scope)?;

        let excluded: Vec<&str> = function.params.iter().map(String::as_str).collect();
        env.merge_from(&scope, &excluded);
        Ok(result)
    }

    /// Runs a native hook inside the body of the builtin that wraps it.
    pub(crate) fn eval_hook(&mut self, hook: Hook, span: Span, env: &Environment) -> EvalResult<Value> {
        let argument = |name: &str| env.lookup(name).cloned().unwrap_or_else(Value::empty);

        match hook {
            Hook::Print => {
                let value = argument(IMPLICIT);
                let text = self.serialize(&value, span)?;
                self.write_line(&text)?;
                Ok(value)
            },
            Hook::Input => Ok(self.input().clone()),
            Hook::Take => {
                let collection = argument(IMPLICIT);
                let count = self.to_number(&argument("n"), span)?;
                let taken = self.take(&collection, to_count(&count, span)?, span)?;
                Ok(Value::from(taken))
            },
        }
    }
}
