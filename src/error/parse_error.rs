use thiserror::Error;

use crate::ast::Span;

/// A character sequence the lexer could not turn into a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error on {span}: Unrecognized input '{text}'.")]
pub struct LexError {
    /// The offending source text.
    pub text: String,
    /// Where the text starts.
    pub span: Span,
}

/// Represents all errors that can occur while building the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Found a token that cannot start or continue an item here.
    #[error("Error on {span}: Didn't recognize token '{token}'.")]
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// Where the token starts.
        span:  Span,
    },
    /// A function definition head listed something other than a plain name.
    #[error("Error on {span}: Function '{name}' has a parameter that is not a variable.")]
    InvalidFunctionDefinition {
        /// Name of the function being defined.
        name: String,
        /// Where the definition starts.
        span: Span,
    },
    /// A filter was not followed by its predicate block.
    #[error("Error on {span}: '{op}' must be followed by a block.")]
    MissingBlock {
        /// Spelling of the filter operator.
        op:   String,
        /// Where the operator appears.
        span: Span,
    },
    /// A zip-with combinator had nothing to its right.
    #[error("Error on {span}: Zip is missing its right operand.")]
    IncompleteZip {
        /// Where the zip operator appears.
        span: Span,
    },
    /// A fold or zip combinator did not form a single expression.
    #[error("Error on {span}: Combinator '{text}' is not a single expression.")]
    MalformedCombinator {
        /// The tokens of the combinator, joined.
        text: String,
        /// Where the combinator starts.
        span: Span,
    },
    /// A base conversion directive was missing or used unknown codes.
    #[error("Error on {span}: Invalid base conversion '{directive}'.")]
    InvalidBaseDirective {
        /// The directive as written.
        directive: String,
        /// Where the directive appears.
        span:      Span,
    },
    /// An array literal contained more than one generator block.
    #[error("Error on {span}: A sequence may only have one generator block.")]
    MultipleGenerators {
        /// Where the array starts.
        span: Span,
    },
    /// The right side of `.` was not a function taking at least one argument.
    #[error("Error on {span}: '.' must be followed by a function that takes an argument.")]
    InvalidCallTarget {
        /// Where the `.` appears.
        span: Span,
    },
}

impl ParseError {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::InvalidFunctionDefinition { span, .. }
            | Self::MissingBlock { span, .. }
            | Self::IncompleteZip { span }
            | Self::MalformedCombinator { span, .. }
            | Self::InvalidBaseDirective { span, .. }
            | Self::MultipleGenerators { span }
            | Self::InvalidCallTarget { span } => *span,
        }
    }
}
