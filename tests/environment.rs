use std::rc::Rc;

use arn::{
    ast::{Node, Span},
    error::RuntimeError,
    interpreter::{
        environment::{Environment, Function},
        value::core::Value,
    },
};

fn constant(value: &str) -> Function {
    Function { params: Rc::from(Vec::<String>::new()),
               body:   Rc::new(Node::StringLiteral { text:  value.to_string(),
                                                     quote: arn::ast::QuoteKind::Double,
                                                     span:  Span::default(), }), }
}

#[test]
fn child_changes_stay_invisible_until_merged() {
    let mut parent = Environment::new();
    parent.set("x", Value::from(1));

    let mut child = parent.clone();
    child.set("x", Value::from(2));
    assert_eq!(parent.lookup("x"), Some(&Value::from(1)));

    parent.merge_from(&child, &[]);
    assert_eq!(parent.lookup("x"), Some(&Value::from(2)));
}

#[test]
fn excluded_names_are_never_merged() {
    let mut parent = Environment::new();
    parent.set("_", Value::from("input"));
    parent.set("y", Value::from(0));

    let mut child = parent.clone();
    child.set("_", Value::from("element"));
    child.set("y", Value::from(5));
    parent.merge_from(&child, &["_"]);

    assert_eq!(parent.lookup("_"), Some(&Value::from("input")));
    assert_eq!(parent.lookup("y"), Some(&Value::from(5)));
}

#[test]
fn functions_merge_like_variables() {
    let mut parent = Environment::new();
    parent.define_function("f", constant("old"));

    let mut child = parent.clone();
    child.define_function("f", constant("new"));
    child.define_function("g", constant("local"));
    parent.merge_from(&child, &[]);

    let f = parent.get_function("f", Span::default()).unwrap();
    assert!(matches!(f.body.as_ref(), Node::StringLiteral { text, .. } if text == "new"));
    assert!(matches!(parent.get_function("g", Span::default()),
                     Err(RuntimeError::UnboundName { kind: "function", .. })));
}

#[test]
fn unbound_variables_report_their_position() {
    let env = Environment::new();
    let err = env.get("nope", Span::new(3, 7)).unwrap_err();

    assert_eq!(err.span(), Some(Span::new(3, 7)));
    assert!(err.to_string().contains("Unknown variable 'nope'"));
}
