use std::io;

use arn::{
    ast::Span,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, DEFAULT_PRECISION},
        value::core::Value,
    },
    util::codec::Dictionary,
};
use bigdecimal::BigDecimal;

fn with_context<T>(f: impl FnOnce(&mut Context<'_>) -> T) -> T {
    let dictionary = Dictionary::default();
    let mut sink = io::sink();
    let mut ctx = Context::new(DEFAULT_PRECISION, Value::empty(), &dictionary, &mut sink);
    f(&mut ctx)
}

fn words(values: &[Value]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn text_to_number() {
    with_context(|ctx| {
        assert_eq!(ctx.to_number(&Value::from(""), Span::default()).unwrap(), BigDecimal::from(0));
        assert_eq!(ctx.to_number(&Value::from(" 42 "), Span::default()).unwrap(), BigDecimal::from(42));
        assert_eq!(ctx.to_number(&Value::from("_3"), Span::default()).unwrap(), BigDecimal::from(-3));
        assert!(matches!(ctx.to_number(&Value::from("abc"), Span::default()),
                         Err(RuntimeError::TypeCoercion { .. })));
    });
}

#[test]
fn collections_to_scalars_use_first_element() {
    with_context(|ctx| {
        let array = Value::from(vec![Value::from("7"), Value::from(8)]);
        assert_eq!(ctx.to_number(&array, Span::default()).unwrap(), BigDecimal::from(7));
        assert_eq!(ctx.to_text(&array).unwrap(), "7");

        let empty = Value::from(Vec::new());
        assert_eq!(ctx.to_text(&empty).unwrap(), "");
        assert!(ctx.to_number(&empty, Span::default()).is_err());
    });
}

#[test]
fn values_to_arrays() {
    with_context(|ctx| {
        let split = ctx.to_array(&Value::from("a bc d"), Span::default()).unwrap();
        assert_eq!(words(&split), ["a", "bc", "d"]);

        let chars = ctx.to_array(&Value::from("abc"), Span::default()).unwrap();
        assert_eq!(words(&chars), ["a", "b", "c"]);

        let digits = ctx.to_array(&Value::from(BigDecimal::from(-12)), Span::default()).unwrap();
        assert_eq!(words(&digits), ["-", "1", "2"]);
    });
}

#[test]
fn numbers_print_without_trailing_zeros() {
    with_context(|ctx| {
        let n: BigDecimal = "12.500".parse().unwrap();
        assert_eq!(ctx.to_text(&Value::from(n)).unwrap(), "12.5");
    });
}

#[test]
fn truthiness() {
    assert!(Value::from(1).is_truthy());
    assert!(!Value::from(0).is_truthy());
    assert!(!Value::from("").is_truthy());
    assert!(Value::from("0").is_truthy());
    assert!(!Value::from(Vec::new()).is_truthy());
}
