/// Lexing and parsing errors.
///
/// Defines the errors raised before evaluation starts: unrecognized input,
/// unexpected tokens, malformed definitions, combinators and directives.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// unbound names, failed coercions and whole-sequence operations on infinite
/// sequences.
pub mod runtime_error;

pub use parse_error::{LexError, ParseError};
pub use runtime_error::RuntimeError;
use thiserror::Error;

use crate::{ast::Span, util::diagnostic::excerpt};

/// Any failure while running a program.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Position of the failure in the source, when one is known.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::Lex(e) => Some(e.span),
            Self::Parse(e) => Some(e.span()),
            Self::Runtime(e) => e.span(),
            Self::Io(_) => None,
        }
    }

    /// Renders the error message followed by the offending source line with a
    /// caret under the failing column.
    ///
    /// # Example
    /// ```
    /// use arn::{Options, parse};
    ///
    /// let source = "1 + nope";
    /// let err = parse(source, &Options::with_input(&[])).unwrap_err();
    /// let rendered = err.render(source);
    ///
    /// assert!(rendered.contains("Unknown variable 'nope'"));
    /// assert!(rendered.ends_with("1 + nope\n    ^"));
    /// ```
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        match self.span() {
            Some(span) => format!("{self}\n{}", excerpt(source, span)),
            None => self.to_string(),
        }
    }
}
