use std::{
    cell::{Cell, RefCell},
    ops::ControlFlow,
    rc::Rc,
};

use tracing::trace;

use crate::{
    ast::{Block, Span},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

/// A lazily generated list.
///
/// A sequence starts from its seed values. Every further element is produced
/// by evaluating the generator block in a copy of the scope the sequence was
/// created in. Inside the generator, successive reads of the block's parameter
/// yield the previous elements, newest first, so `[1 1 {+}]` is the Fibonacci
/// sequence. Generated elements are cached and never recomputed.
///
/// Without a declared length the sequence is infinite, and operations that need
/// every element fail with `UnboundedSequence`.
#[derive(Debug)]
pub struct Sequence {
    elements:  Rc<RefCell<Vec<Value>>>,
    generator: Block,
    length:    Option<usize>,
    scope:     Environment,
    runs:      Cell<usize>,
}

impl Sequence {
    #[must_use]
    pub fn new(seeds: Vec<Value>, generator: Block, length: Option<usize>, scope: Environment) -> Self {
        Self { elements: Rc::new(RefCell::new(seeds)),
               generator,
               length,
               scope,
               runs: Cell::new(0) }
    }

    /// The declared length, or `None` for an infinite sequence.
    #[must_use]
    pub const fn length(&self) -> Option<usize> {
        self.length
    }

    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.length.is_some()
    }

    /// The elements computed so far, limited to the declared length.
    #[must_use]
    pub fn computed(&self) -> Vec<Value> {
        let elements = self.elements.borrow();
        let visible = self.length.map_or(elements.len(), |n| n.min(elements.len()));
        elements[..visible].to_vec()
    }

    /// How many times the generator has been evaluated.
    #[must_use]
    pub fn generator_runs(&self) -> usize {
        self.runs.get()
    }

    /// Returns the element at `index`, generating any missing elements before
    /// it. Indices past the declared length yield `None`.
    pub fn at(&self, index: usize, ctx: &mut Context<'_>) -> EvalResult<Option<Value>> {
        if self.length.is_some_and(|n| index >= n) {
            return Ok(None);
        }
        while self.elements.borrow().len() <= index {
            self.generate_next(ctx)?;
        }
        Ok(self.elements.borrow().get(index).cloned())
    }

    fn generate_next(&self, ctx: &mut Context<'_>) -> EvalResult<()> {
        let visible = self.elements.borrow().len();
        let latest = self.elements.borrow().last().cloned();

        let mut scope = self.scope.clone();
        if let Some(latest) = latest {
            scope.set(self.generator.param.clone(), latest);
        }
        scope.bind_recurrence(&self.generator.param, Rc::clone(&self.elements), visible);

        let value = ctx.eval_program(&self.generator.body, &mut scope)?;
        self.runs.set(self.runs.get() + 1);
        trace!(index = visible, "generated sequence element");
        self.elements.borrow_mut().push(value);
        Ok(())
    }

    /// Visits elements in order until `visit` breaks or the sequence ends.
    ///
    /// On an infinite sequence this only returns once `visit` breaks.
    pub fn for_each<F>(&self, ctx: &mut Context<'_>, mut visit: F) -> EvalResult<()>
        where F: FnMut(&mut Context<'_>, Value) -> EvalResult<ControlFlow<()>>
    {
        let mut index = 0;
        while let Some(value) = self.at(index, ctx)? {
            if visit(ctx, value)?.is_break() {
                break;
            }
            index += 1;
        }
        Ok(())
    }

    /// Returns up to the first `count` elements.
    pub fn take(&self, count: usize, ctx: &mut Context<'_>) -> EvalResult<Vec<Value>> {
        let mut taken = Vec::with_capacity(count.min(1024));
        if count == 0 {
            return Ok(taken);
        }
        self.for_each(ctx, |_, value| {
                taken.push(value);
                Ok(if taken.len() < count { ControlFlow::Continue(()) } else { ControlFlow::Break(()) })
            })?;
        Ok(taken)
    }

    fn require_finite(&self, action: &'static str, span: Span) -> EvalResult<usize> {
        self.length.ok_or(RuntimeError::UnboundedSequence { action, span })
    }

    /// Generates every element.
    ///
    /// # Errors
    /// Fails with `UnboundedSequence` if the sequence is infinite.
    pub fn to_vec(&self, ctx: &mut Context<'_>, span: Span) -> EvalResult<Vec<Value>> {
        let length = self.require_finite("materialize", span)?;
        self.take(length, ctx)
    }

    /// Applies `f` to every element.
    ///
    /// # Errors
    /// Fails with `UnboundedSequence` if the sequence is infinite.
    pub fn map<F>(&self, ctx: &mut Context<'_>, span: Span, mut f: F) -> EvalResult<Vec<Value>>
        where F: FnMut(&mut Context<'_>, Value) -> EvalResult<Value>
    {
        let length = self.require_finite("map", span)?;
        let mut mapped = Vec::with_capacity(length.min(1024));
        self.for_each(ctx, |ctx, value| {
                mapped.push(f(ctx, value)?);
                Ok(ControlFlow::Continue(()))
            })?;
        Ok(mapped)
    }

    /// Keeps the elements for which `keep` returns `true`.
    ///
    /// # Errors
    /// Fails with `UnboundedSequence` if the sequence is infinite.
    pub fn filter<F>(&self, ctx: &mut Context<'_>, span: Span, mut keep: F) -> EvalResult<Vec<Value>>
        where F: FnMut(&mut Context<'_>, &Value) -> EvalResult<bool>
    {
        self.require_finite("filter", span)?;
        let mut kept = Vec::new();
        self.for_each(ctx, |ctx, value| {
                if keep(ctx, &value)? {
                    kept.push(value);
                }
                Ok(ControlFlow::Continue(()))
            })?;
        Ok(kept)
    }

    /// Joins the text form of every element with `separator`.
    ///
    /// # Errors
    /// Fails with `UnboundedSequence` if the sequence is infinite.
    pub fn join(&self, separator: &str, ctx: &mut Context<'_>, span: Span) -> EvalResult<String> {
        self.require_finite("join", span)?;
        let mut joined = String::new();
        let mut first = true;
        self.for_each(ctx, |ctx, value| {
                if !first {
                    joined.push_str(separator);
                }
                first = false;
                joined.push_str(&ctx.to_text(&value)?);
                Ok(ControlFlow::Continue(()))
            })?;
        Ok(joined)
    }
}
