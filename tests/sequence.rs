use std::io;

use arn::{
    interpreter::{
        evaluator::{
            core::{Context, DEFAULT_PRECISION},
            function::builtin::bootstrap,
        },
        lexer::tokenize,
        parser::core::parse,
        value::core::Value,
    },
    util::codec::Dictionary,
};

/// Evaluates `source` and hands the resulting value to `check` together with
/// the context that can keep generating its elements.
fn with_value(source: &str, check: impl FnOnce(&mut Context<'_>, Value)) {
    let dictionary = Dictionary::default();
    let mut sink = io::sink();
    let mut ctx = Context::new(DEFAULT_PRECISION, Value::empty(), &dictionary, &mut sink);

    let (mut env, mut calls) = bootstrap(Value::empty()).unwrap();
    let tokens = tokenize(source).unwrap();
    let program = parse(&tokens, &mut calls).unwrap();
    let value = ctx.eval_program(&program, &mut env).unwrap();

    check(&mut ctx, value);
}

#[test]
fn elements_are_generated_once() {
    with_value("[1 1 {+}]", |ctx, value| {
        let Value::Sequence(seq) = value else {
            panic!("expected a sequence, got {value}");
        };
        assert!(!seq.is_finite());

        assert_eq!(seq.at(10, ctx).unwrap(), Some(Value::from(89)));
        let runs = seq.generator_runs();
        assert_eq!(runs, 9);

        assert_eq!(seq.at(10, ctx).unwrap(), Some(Value::from(89)));
        assert_eq!(seq.at(5, ctx).unwrap(), Some(Value::from(8)));
        assert_eq!(seq.generator_runs(), runs);
    });
}

#[test]
fn declared_length_bounds_the_sequence() {
    with_value("[2 {*2} -> 4]", |ctx, value| {
        let Value::Sequence(seq) = value else {
            panic!("expected a sequence, got {value}");
        };
        assert_eq!(seq.length(), Some(4));
        assert_eq!(seq.at(4, ctx).unwrap(), None);

        let all = seq.to_vec(ctx, Default::default()).unwrap();
        assert_eq!(Value::from(all).to_string(), "2 4 8 16");
        assert_eq!(seq.generator_runs(), 3);
    });
}

#[test]
fn recurrence_falls_back_to_latest_element() {
    with_value("[1 {+}]", |ctx, value| {
        let Value::Sequence(seq) = value else {
            panic!("expected a sequence, got {value}");
        };
        let first = seq.take(5, ctx).unwrap();
        assert_eq!(Value::from(first).to_string(), "1 2 3 5 8");
    });
}

#[test]
fn whole_sequence_operations_need_a_length() {
    with_value("[1 {+1}]", |ctx, value| {
        let Value::Sequence(seq) = value else {
            panic!("expected a sequence, got {value}");
        };
        assert!(seq.map(ctx, Default::default(), |_, v| Ok(v)).is_err());
        assert!(seq.filter(ctx, Default::default(), |_, _| Ok(true)).is_err());
        assert!(seq.join(",", ctx, Default::default()).is_err());
        assert_eq!(seq.take(3, ctx).unwrap().len(), 3);
    });
}
