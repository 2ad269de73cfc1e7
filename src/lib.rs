//! # arn
//!
//! arn is an interpreter for Arn, a terse golfing language. Programs are
//! sequences of expressions over text, arbitrary-precision numbers, arrays and
//! lazily generated sequences, with implicit operands filled in from the
//! variable `_`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{self, BufRead, IsTerminal, Write};

use tracing::debug;

use crate::{
    error::Error,
    interpreter::{
        evaluator::{
            core::{Context, DEFAULT_PRECISION},
            function::builtin::bootstrap,
        },
        lexer::tokenize,
        parser::core::parse as parse_tokens,
        value::core::Value,
    },
    util::codec::{Dictionary, is_packed, unpack},
};

/// Defines the structure of parsed code.
///
/// This module declares the [`ast::Node`] enum and related types that
/// represent the syntactic structure of a program as a tree. The AST is built
/// by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines node types for all language constructs.
/// - Declares every operator with its spelling and precedence.
/// - Attaches source locations to nodes for error reporting.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// Every error carries the position it refers to, so it can be rendered with
/// an excerpt of the offending source line.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line and column numbers and detailed messages.
/// - Renders errors together with the source excerpt.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation and value
/// representations to provide a complete runtime for Arn programs.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator, scopes and sequences.
/// - Provides entry points for each phase.
pub mod interpreter;
/// General utilities shared by the phases.
///
/// # Responsibilities
/// - Parse numerals and convert numbers to counts and indices.
/// - Render source excerpts for diagnostics.
/// - Pack and unpack programs and decode dictionary strings.
pub mod util;

/// Settings for a single program run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Significant digits kept by arithmetic.
    pub precision:      u64,
    /// Predetermined input lines. When `None`, input is read from standard
    /// input before evaluation starts.
    pub stdin:          Option<Vec<String>>,
    /// Wraps the program as `{program}\`, mapping it over the input.
    pub wrap_in_braces: bool,
    /// Writes the token stream to the output before evaluating.
    pub dump_tokens:    bool,
    /// Writes the syntax tree to the output before evaluating.
    pub dump_ast:       bool,
    /// Word list used to decode dictionary strings.
    pub dictionary:     Dictionary,
}

impl Default for Options {
    fn default() -> Self {
        Self { precision:      DEFAULT_PRECISION,
               stdin:          None,
               wrap_in_braces: false,
               dump_tokens:    false,
               dump_ast:       false,
               dictionary:     Dictionary::default(), }
    }
}

impl Options {
    /// Default options with the given input lines.
    #[must_use]
    pub fn with_input(lines: &[&str]) -> Self {
        Self { stdin: Some(lines.iter().map(|line| (*line).to_string()).collect()),
               ..Self::default() }
    }
}

/// Runs a program and prints its final value to standard output.
///
/// # Errors
/// Returns an error if lexing, parsing or evaluation fails, or if writing the
/// output fails.
pub fn run(source: &str, options: &Options) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut output = stdout.lock();
    run_with_output(source, options, &mut output)
}

/// Runs a program, writing everything it prints and its final value to
/// `output`.
///
/// # Example
/// ```
/// use arn::{Options, run_with_output};
///
/// let mut output = Vec::new();
/// run_with_output("+\\[1 {+1} -> 10]", &Options::with_input(&[]), &mut output).unwrap();
///
/// assert_eq!(String::from_utf8(output).unwrap(), "55\n");
/// ```
pub fn run_with_output<W: Write>(source: &str, options: &Options, output: &mut W) -> Result<(), Error> {
    execute(source, options, output, true).map(|_| ())
}

/// Evaluates a program and returns its final value without printing it.
///
/// Output from `out` and `outl` is discarded. A finite sequence result is
/// returned as the array of its elements.
///
/// # Example
/// ```
/// use arn::{Options, parse};
///
/// let value = parse("${!%2}1=>10", &Options::with_input(&[])).unwrap();
/// assert_eq!(value.to_string(), "2 4 6 8 10");
/// ```
pub fn parse(source: &str, options: &Options) -> Result<Value, Error> {
    execute(source, options, &mut io::sink(), false)
}

fn execute(source: &str, options: &Options, output: &mut dyn Write, print_result: bool) -> Result<Value, Error> {
    let mut code = if is_packed(source) { unpack(source) } else { source.to_string() };
    if options.wrap_in_braces {
        code = format!("{{{code}}}\\");
    }

    let tokens = tokenize(&code)?;
    debug!(tokens = tokens.len(), "tokenized program");
    if options.dump_tokens {
        for token in &tokens {
            writeln!(output, "{token:?}")?;
        }
    }

    let input = read_input(options)?;
    let (mut env, mut calls) = bootstrap(input.clone())?;
    let program = parse_tokens(&tokens, &mut calls)?;
    if options.dump_ast {
        writeln!(output, "{program:#?}")?;
    }

    let mut ctx = Context::new(options.precision, input, &options.dictionary, output);
    let value = ctx.eval_program(&program, &mut env)?;

    if print_result {
        let text = ctx.serialize(&value, program.span)?;
        ctx.write_line(&text)?;
    }
    Ok(ctx.settle(value, program.span)?)
}

/// The value bound to `_` at start-up: one line is text, several lines are an
/// array of text, and no input is the empty string.
fn read_input(options: &Options) -> io::Result<Value> {
    let lines = match &options.stdin {
        Some(lines) => lines.clone(),
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                let mut line = String::new();
                stdin.lock().read_line(&mut line)?;
                vec![line.trim_end_matches(['\r', '\n']).to_string()]
            } else {
                stdin.lock().lines().collect::<io::Result<Vec<_>>>()?
            }
        },
    };

    Ok(match lines.as_slice() {
        [] => Value::empty(),
        [line] => Value::from(line.as_str()),
        many => Value::from(many.iter().map(|line| Value::from(line.as_str())).collect::<Vec<_>>()),
    })
}
