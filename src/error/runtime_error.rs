use thiserror::Error;

use crate::ast::Span;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A variable or function name had no binding in scope.
    #[error("Error on {span}: Unknown {kind} '{name}'.")]
    UnboundName {
        /// `"variable"` or `"function"`.
        kind: &'static str,
        /// The name that was looked up.
        name: String,
        /// Where the name was used.
        span: Span,
    },
    /// A call supplied a different number of arguments than the definition in
    /// scope declares.
    #[error("Error on {span}: Function '{name}' takes {expected} argument(s), but {found} were supplied.")]
    ArityMismatch {
        /// Name of the function.
        name:     String,
        /// Parameter count of the definition in scope.
        expected: usize,
        /// Number of arguments at the call site.
        found:    usize,
        /// Where the call appears.
        span:     Span,
    },
    /// A mutating operator was applied to something other than a variable.
    #[error("Error on {span}: '{op}' can only modify a variable.")]
    ImmutableTarget {
        /// Spelling of the operator.
        op:   &'static str,
        /// Where the operator appears.
        span: Span,
    },
    /// A whole-sequence operation was requested on an infinite sequence.
    #[error("Error on {span}: Cannot {action} a sequence without a declared length.")]
    UnboundedSequence {
        /// What was attempted, such as `"map"`.
        action: &'static str,
        /// Where the operation was requested.
        span:   Span,
    },
    /// A value could not be converted to the type an operation needs.
    #[error("Error on {span}: Type error: {details}.")]
    TypeCoercion {
        /// Description of the failed conversion.
        details: String,
        /// Where the conversion was needed.
        span:    Span,
    },
    /// An arithmetic operation had no defined result.
    #[error("Error on {span}: {details}.")]
    Arithmetic {
        /// Description of the failure.
        details: &'static str,
        /// Where the operation appears.
        span:    Span,
    },
    /// Writing program output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl RuntimeError {
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::UnboundName { span, .. }
            | Self::ArityMismatch { span, .. }
            | Self::ImmutableTarget { span, .. }
            | Self::UnboundedSequence { span, .. }
            | Self::TypeCoercion { span, .. }
            | Self::Arithmetic { span, .. } => Some(*span),
            Self::Output(_) => None,
        }
    }
}
