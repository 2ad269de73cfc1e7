use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use crate::{
    ast::{Node, Span},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A callable definition: parameter names and a body evaluated in a child
/// scope of the caller.
#[derive(Debug, Clone)]
pub struct Function {
    pub params: Rc<[String]>,
    pub body:   Rc<Node>,
}

/// The elements a sequence generator may refer back to.
///
/// Each lookup of the generator's parameter returns the next older element,
/// starting from the most recent one.
#[derive(Debug, Clone)]
struct Recurrence {
    name:    String,
    history: Rc<RefCell<Vec<Value>>>,
    /// Number of elements visible to this generator run.
    visible: usize,
    /// Number of lookups already served.
    served:  Rc<Cell<usize>>,
}

impl Recurrence {
    fn next(&self) -> Option<Value> {
        let served = self.served.get();
        if served >= self.visible {
            return None;
        }
        self.served.set(served + 1);
        self.history.borrow().get(self.visible - 1 - served).cloned()
    }
}

/// A scope of variable and function bindings.
///
/// Scopes are copied rather than chained: a child starts as a full copy of its
/// parent, and the parent later imports whichever shared names the child
/// changed with [`Environment::merge_from`].
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables:  HashMap<String, Value>,
    functions:  HashMap<String, Function>,
    recurrence: Option<Recurrence>,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a variable.
    ///
    /// Inside a sequence generator, successive lookups of the generator's
    /// parameter return successively older elements. Once those run out, the
    /// ordinary binding is returned.
    ///
    /// # Errors
    /// Returns `UnboundName` if the variable is not bound.
    pub fn get(&self, name: &str, span: Span) -> EvalResult<Value> {
        if let Some(recurrence) = &self.recurrence
           && recurrence.name == name
           && let Some(value) = recurrence.next()
        {
            return Ok(value);
        }
        self.lookup(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnboundName { kind: "variable",
                                                       name: name.to_string(),
                                                       span })
    }

    /// Reads a binding without consuming a recurrence element.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Binds `name`, replacing any previous value.
    ///
    /// Rebinding a generator's parameter ends its recurrence in this scope.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if self.recurrence.as_ref().is_some_and(|r| r.name == name) {
            self.recurrence = None;
        }
        self.variables.insert(name, value);
    }

    /// Looks up a function definition.
    ///
    /// # Errors
    /// Returns `UnboundName` if no function of that name is defined.
    pub fn get_function(&self, name: &str, span: Span) -> EvalResult<Function> {
        self.functions
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnboundName { kind: "function",
                                                       name: name.to_string(),
                                                       span })
    }

    pub fn define_function(&mut self, name: impl Into<String>, function: Function) {
        self.functions.insert(name.into(), function);
    }

    /// Imports from `child` every variable and function that both scopes
    /// share, except the names in `excluded`.
    ///
    /// Names the child introduced itself stay local to the child.
    ///
    /// # Example
    /// ```
    /// use arn::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let mut parent = Environment::new();
    /// parent.set("x", Value::from(1));
    /// parent.set("v", Value::from(0));
    ///
    /// let mut child = parent.clone();
    /// child.set("x", Value::from(2));
    /// child.set("v", Value::from(9));
    /// child.set("fresh", Value::from(3));
    ///
    /// parent.merge_from(&child, &["v"]);
    /// assert_eq!(parent.lookup("x"), Some(&Value::from(2)));
    /// assert_eq!(parent.lookup("v"), Some(&Value::from(0)));
    /// assert_eq!(parent.lookup("fresh"), None);
    /// ```
    pub fn merge_from(&mut self, child: &Self, excluded: &[&str]) {
        for (name, value) in &mut self.variables {
            if !excluded.contains(&name.as_str())
               && let Some(updated) = child.variables.get(name)
            {
                value.clone_from(updated);
            }
        }
        for (name, function) in &mut self.functions {
            if !excluded.contains(&name.as_str())
               && let Some(updated) = child.functions.get(name)
            {
                function.clone_from(updated);
            }
        }
    }

    /// Makes successive lookups of `name` walk back through the first
    /// `visible` elements of `history`, newest first.
    pub(crate) fn bind_recurrence(&mut self,
                                  name: &str,
                                  history: Rc<RefCell<Vec<Value>>>,
                                  visible: usize) {
        self.recurrence = Some(Recurrence { name: name.to_string(),
                                            history,
                                            visible,
                                            served: Rc::new(Cell::new(0)) });
    }
}
