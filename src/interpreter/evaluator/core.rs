use std::{io::Write, rc::Rc};

use bigdecimal::BigDecimal;

use crate::{
    ast::{Block, IMPLICIT, InfixOp, Node, Program, QuoteKind, Span},
    error::RuntimeError,
    interpreter::{
        environment::{Environment, Function},
        sequence::Sequence,
        value::{core::Value, number},
    },
    util::{
        codec::Dictionary,
        num::{parse_numeral, to_count},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default number of significant digits kept by arithmetic.
pub const DEFAULT_PRECISION: u64 = 25;

/// Stores the state shared by an entire evaluation.
///
/// Variable and function bindings live in [`Environment`]s that are passed
/// alongside the context, since scopes are copied and merged as evaluation
/// enters and leaves blocks. The context holds what every scope shares: the
/// numeric precision, the program input, the dictionary and the output.
pub struct Context<'a> {
    /// Significant digits kept after every arithmetic step.
    pub precision: u64,
    input:         Value,
    dictionary:    &'a Dictionary,
    output:        &'a mut dyn Write,
}

impl<'a> Context<'a> {
    /// Creates an evaluation context.
    ///
    /// # Parameters
    /// - `precision`: Significant digits kept by arithmetic.
    /// - `input`: The value returned by `in` and bound to `_` at start-up.
    /// - `dictionary`: Word list used to decode dictionary strings.
    /// - `output`: Where `out` writes.
    #[must_use]
    pub fn new(precision: u64,
               input: Value,
               dictionary: &'a Dictionary,
               output: &'a mut dyn Write)
               -> Self {
        Self { precision,
               input,
               dictionary,
               output }
    }

    #[must_use]
    pub const fn input(&self) -> &Value {
        &self.input
    }

    /// Writes one line to the program output.
    pub fn write_line(&mut self, text: &str) -> EvalResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Wraps an arithmetic result, rounded to the context precision.
    ///
    /// # Errors
    /// `Arithmetic` if the result exceeds the exponent range.
    pub(crate) fn number(&self, value: &BigDecimal, span: Span) -> EvalResult<Value> {
        number::bounded(number::round(value, self.precision), span).map(Value::Number)
    }

    /// Evaluates the items of a program in order and returns the value of the
    /// last one, or the empty string for an empty program.
    pub fn eval_program(&mut self, program: &Program, env: &mut Environment) -> EvalResult<Value> {
        let mut result = Value::empty();
        for item in &program.items {
            result = self.eval(item, env)?;
        }
        Ok(result)
    }

    /// Evaluates a node and returns the resulting value.
    ///
    /// This is the main entry point for evaluation; it dispatches on the node
    /// kind.
    ///
    /// # Parameters
    /// - `node`: Node to evaluate.
    /// - `env`: The scope the node is evaluated in. Assignments and function
    ///   definitions modify it.
    pub fn eval(&mut self, node: &Node, env: &mut Environment) -> EvalResult<Value> {
        match node {
            Node::StringLiteral { text, quote, .. } => Ok(self.eval_string(text, *quote)),
            Node::IntegerLiteral { text, span } => self.eval_numeral(text, *span),
            Node::Variable { name, span } => env.get(name, *span),
            Node::Call { name, args, span } => self.eval_call(name, args, None, *span, env),
            Node::FunctionDef { name, params, body, .. } => {
                let params = params.iter().map(|p| p.name.clone()).collect();
                env.define_function(name.clone(),
                                    Function { params,
                                               body: Rc::new(body.as_ref().clone()) });
                Ok(Value::empty())
            },
            Node::Expression { inner, .. } => self.eval_program(inner, env),
            Node::Block(block) => self.eval_block(block, env),
            Node::Array { body, .. } => self.eval_array(body, env),
            Node::Prefix { op, arg, extra, span } => self.eval_prefix(*op, arg, extra, *span, env),
            Node::Infix { op,
                          left,
                          right,
                          extra,
                          span, } => self.eval_infix(*op, left, right, extra, *span, env),
            Node::Suffix { op, arg, extra, span } => self.eval_suffix(*op, arg, extra, *span, env),
            Node::NativeHook { hook, span } => self.eval_hook(*hook, *span, env),
        }
    }

    fn eval_string(&self, text: &str, quote: QuoteKind) -> Value {
        match quote {
            QuoteKind::Double => Value::from(text),
            QuoteKind::Single => Value::from(self.dictionary.decode(text, true)),
            QuoteKind::Backtick => Value::from(self.dictionary.decode(text, false)),
        }
    }

    fn eval_numeral(&self, text: &str, span: Span) -> EvalResult<Value> {
        let n = parse_numeral(text).ok_or_else(|| {
                                       RuntimeError::TypeCoercion { details: format!("'{text}' is not a number"),
                                                                    span }
                                   })?;
        self.number(&n, span)
    }

    /// Evaluates a block directly: its parameter is bound to the current `_`.
    fn eval_block(&mut self, block: &Block, env: &mut Environment) -> EvalResult<Value> {
        let current = env.lookup(IMPLICIT).cloned().unwrap_or_else(Value::empty);
        self.apply_block(block, current, env)
    }

    /// Evaluates an array literal. An array containing a block becomes a
    /// sequence seeded with the other items.
    fn eval_array(&mut self, body: &Program, env: &mut Environment) -> EvalResult<Value> {
        let Some(generator) = body.block() else {
            let items = body.items
                            .iter()
                            .map(|item| self.eval(item, env))
                            .collect::<EvalResult<Vec<_>>>()?;
            return Ok(Value::from(items));
        };

        let mut seeds = Vec::new();
        let mut length = None;
        for item in &body.items {
            match item {
                Node::Block(_) => {},
                Node::Infix { op: op @ (InfixOp::Range | InfixOp::ClosedRange),
                              left,
                              right,
                              .. } if left.is_implicit() && length.is_none() => {
                    let declared = self.eval(right, env)?;
                    let declared = self.to_number(&declared, right.span())?;
                    let count = to_count(&declared, right.span())?;
                    length = Some(if *op == InfixOp::ClosedRange { count + 1 } else { count });
                },
                _ => seeds.push(self.eval(item, env)?),
            }
        }

        Ok(Value::from(Sequence::new(seeds, generator.clone(), length, env.clone())))
    }
}
