use std::rc::Rc;

use crate::{
    ast::{Hook, IMPLICIT, Node, Span},
    error::Error,
    interpreter::{
        environment::{Environment, Function},
        lexer::tokenize,
        parser::core::{CallTable, parse},
        value::core::Value,
    },
    util::num::parse_numeral,
};

/// How a builtin computes its result.
#[derive(Clone, Copy)]
enum Body {
    /// Supplied by the host.
    Native(Hook),
    /// Arn source parsed at start-up.
    Source(&'static str),
}

/// Defines builtin functions by generating a definition table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the parameter names,
/// - the body.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table used at start-up).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                params: [$($param:literal),*],
                body: $body:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:   &'static str,
            params: &'static [&'static str],
            body:   Body,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, params: &[$($param),*], body: $body },
            )*
        ];
    };
}

builtin_functions! {
    "out"  => { params: ["_"],        body: Body::Native(Hook::Print) },
    "in"   => { params: [],           body: Body::Native(Hook::Input) },
    "take" => { params: ["_", "n"],   body: Body::Native(Hook::Take) },
    "outl" => { params: ["_"],        body: Body::Source("out(_|\"\\n\")") },
    "max"  => { params: ["_"],        body: Body::Source("(:<_)?0") },
    "min"  => { params: ["_"],        body: Body::Source("(:>_)?0") },
    "fact" => { params: ["_"],        body: Body::Source("*\\1=>") },
    "mean" => { params: ["_"],        body: Body::Source("(+\\)/(#)") },
    "mode" => { params: ["_"],        body: Body::Source("(:<(:@)):{:{") },
    "intr" => { params: ["_", "sep"], body: Body::Source("|{|sep}\\") },
}

/// Numeric constants bound at start-up, written as numerals.
const CONSTANTS: &[(&str, &str)] = &[("t", "1"),
                                     ("f", "0"),
                                     ("pi", "3.14159265358979323846"),
                                     ("e", "2.71828182845904523536")];

/// Builds the scope a program starts in, together with the call table the
/// parser needs to resolve builtin calls.
///
/// `_` is bound to `input`, `c` to the empty string, and the constants `t`,
/// `f`, `pi` and `e` to their values.
///
/// # Example
/// ```
/// use arn::interpreter::{evaluator::function::builtin::bootstrap, value::core::Value};
///
/// let (env, calls) = bootstrap(Value::from("hi")).unwrap();
///
/// assert_eq!(calls.get("intr"), Some(&2));
/// assert_eq!(env.lookup("_"), Some(&Value::from("hi")));
/// assert!(env.get_function("mode", Default::default()).is_ok());
/// ```
pub fn bootstrap(input: Value) -> Result<(Environment, CallTable), Error> {
    let mut calls: CallTable = BUILTIN_TABLE.iter()
                                            .map(|builtin| (builtin.name.to_string(), builtin.params.len()))
                                            .collect();
    let mut env = Environment::new();

    for builtin in BUILTIN_TABLE {
        let body = match builtin.body {
            Body::Native(hook) => Node::NativeHook { hook,
                                                     span: Span::default() },
            Body::Source(source) => {
                let tokens = tokenize(source)?;
                let program = parse(&tokens, &mut calls)?;
                Node::Expression { span:  program.span,
                                   inner: program, }
            },
        };
        let params = builtin.params.iter().map(|param| (*param).to_string()).collect();
        env.define_function(builtin.name,
                            Function { params,
                                       body: Rc::new(body) });
    }

    for (name, numeral) in CONSTANTS {
        env.set(*name, parse_numeral(numeral).map_or_else(|| Value::from(*numeral), Value::Number));
    }
    env.set("c", Value::empty());
    env.set(IMPLICIT, input);

    Ok((env, calls))
}
