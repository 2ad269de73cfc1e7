/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the syntax tree, applies operators with the coercion
/// rules of the language, calls functions and drives lazy sequences.
///
/// # Responsibilities
/// - Evaluates every node kind against a scope.
/// - Converts between text, numbers and arrays as operators require.
/// - Reports runtime errors such as unbound names or unbounded sequences.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces tokens for strings,
/// numerals, identifiers and punctuation, each tagged with its line and
/// column.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source location.
/// - Unescapes double-quoted text and keeps dictionary strings verbatim.
/// - Reports lexical errors for input no token matches.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// Operators are assigned their prefix, infix or suffix role from context and
/// grouped by precedence climbing. Function calls are resolved while parsing
/// using a table of known arities.
///
/// # Responsibilities
/// - Converts tokens into [`crate::ast::Node`] trees.
/// - Fills in the implicit `_` wherever an operand is omitted.
/// - Builds fold and zip combinators, filters, blocks and sequences.
pub mod parser;
/// Variable and function scopes.
///
/// Scopes are copied on entry and selectively merged back on exit.
pub mod environment;
/// Lazily generated, cached sequences.
pub mod sequence;
/// The value module defines the runtime data types for evaluation.
///
/// Values are text, arbitrary-precision numbers, arrays and lazy sequences.
///
/// # Responsibilities
/// - Defines the `Value` enum and its conversions.
/// - Implements truthiness, equality and display.
/// - Provides the decimal arithmetic helpers the evaluator uses.
pub mod value;
