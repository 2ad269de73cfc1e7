use std::collections::HashMap;

use tracing::debug;

use crate::{
    ast::{Program, Span},
    error::ParseError,
    interpreter::lexer::{Token, TokenKind},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Maps each known function name to the number of arguments it takes.
///
/// Calls are resolved while parsing, so the table must hold builtins and every
/// function defined earlier in the program.
pub type CallTable = HashMap<String, usize>;

/// Binding power at the start of an item: every operator binds.
pub const LOWEST: i32 = i32::MIN;

/// Binding power of call arguments: no operator binds.
pub const ARGUMENT: i32 = i32::MAX;

/// Where an operand is being parsed. Determines whether blocks may start it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The start of an item in a program, group, block or array.
    Item,
    /// The operand of a prefix operator or the body of a definition.
    Operand,
    /// The right operand of an infix operator.
    Right,
    /// A call argument.
    Argument,
}

/// A recursive-descent, precedence-climbing parser over a token slice.
pub struct Parser<'t> {
    pub(super) tokens: &'t [Token],
    pub(super) pos:    usize,
    pub(super) calls:  CallTable,
}

impl<'t> Parser<'t> {
    #[must_use]
    pub const fn new(tokens: &'t [Token], calls: CallTable) -> Self {
        Self { tokens,
               pos: 0,
               calls }
    }

    /// Parses every token into a program.
    ///
    /// Groups left open at the end of input are closed implicitly.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let span = self.current_span();
        let items = self.parse_items(None)?;
        Ok(Program::new(items, span))
    }

    /// Returns the call table, including every function the parsed program
    /// defined.
    #[must_use]
    pub fn into_calls(self) -> CallTable {
        self.calls
    }

    pub(super) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    pub(super) fn peek_at(&self, offset: usize) -> Option<&'t Token> {
        self.tokens.get(self.pos + offset)
    }

    pub(super) fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub(super) fn peek_is(&self, spelling: &str) -> bool {
        self.peek().is_some_and(|t| t.is_punct(spelling))
    }

    /// Returns `true` at the end of input or in front of a closing bracket,
    /// where an omitted operand becomes `_`.
    pub(super) fn at_boundary(&self) -> bool {
        self.peek().is_none_or(is_closer)
    }

    /// Span of the next token, or of the position just past the last one.
    pub(super) fn current_span(&self) -> Span {
        self.peek()
            .or_else(|| self.tokens.last())
            .map_or_else(|| Span::new(1, 1), |t| t.span)
    }
}

/// Returns `true` for `)`, `]` and `}`.
pub(super) fn is_closer(token: &Token) -> bool {
    token.kind == TokenKind::Punctuation && matches!(token.text.as_str(), ")" | "]" | "}")
}

/// Builds the syntax tree for a token stream.
///
/// `calls` must describe the functions visible to the program. Definitions
/// found while parsing are added to it.
///
/// # Errors
/// Returns a [`ParseError`] describing the first malformed construct.
///
/// # Example
/// ```
/// use arn::{
///     ast::Node,
///     interpreter::{lexer::tokenize, parser::core::{CallTable, parse}},
/// };
///
/// let tokens = tokenize("1 2 + 3").unwrap();
/// let program = parse(&tokens, &mut CallTable::new()).unwrap();
///
/// assert_eq!(program.items.len(), 2);
/// assert!(matches!(program.items[1], Node::Infix { .. }));
/// ```
pub fn parse(tokens: &[Token], calls: &mut CallTable) -> ParseResult<Program> {
    let mut parser = Parser::new(tokens, std::mem::take(calls));
    let result = parser.parse_program();
    *calls = parser.into_calls();
    let program = result?;
    debug!(items = program.items.len(), "parsed program");
    Ok(program)
}
