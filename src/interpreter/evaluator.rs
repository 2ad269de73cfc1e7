/// Core evaluation logic.
///
/// Holds the evaluation [`core::Context`] and dispatches every node kind:
/// literals, variables, groups, blocks, arrays and sequences.
pub mod core;

/// Conversions between value kinds.
///
/// Implements `to_number`, `to_text` and `to_array`, which every operator uses
/// to accept whatever kind of value it is given.
pub mod coerce;

/// Prefix operator evaluation.
///
/// Handles logic, numeric, text and ordering operators written before their
/// operand, including the mutating `++` and `--`.
pub mod prefix;

/// Infix operator evaluation.
///
/// Implements arithmetic, comparison, text, range, indexing, assignment and
/// membership operators.
pub mod infix;

/// Suffix operator evaluation.
///
/// Length, base conversion, splitting, slicing, grouping and flattening.
pub mod suffix;

/// Whole-collection operations.
///
/// Folds, filters and zips, along with applying a block or a combinator to
/// individual elements.
pub mod iteration;

/// Function calls and builtins.
///
/// Evaluates calls to user-defined and builtin functions and the native hooks
/// that builtins use for output and input.
pub mod function;

/// The output serializer.
///
/// Turns the final value of a program into the text written to the output.
pub mod output;
