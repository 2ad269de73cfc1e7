use std::ops::Range;

use crate::{
    ast::{
        Block, Extra, InfixOp, Node, PrefixOp, Program, Span, SuffixOp, TEMPLATE_LEFT, TEMPLATE_RIGHT,
        Template,
    },
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{LOWEST, ParseResult, Parser, Position},
    },
};

/// A parsed item together with the tokens it was parsed from.
pub(super) struct Sibling {
    pub(super) node:   Node,
    pub(super) tokens: Range<usize>,
}

/// Returns the operator a left-less item starts with, if the token is an
/// infix or suffix spelling that is not also a prefix.
fn leading_operator_precedence(token: &Token) -> Option<i32> {
    if token.kind != TokenKind::Punctuation || PrefixOp::from_spelling(&token.text).is_some() {
        return None;
    }
    InfixOp::from_spelling(&token.text).map(InfixOp::precedence)
                                       .or_else(|| SuffixOp::from_spelling(&token.text).map(SuffixOp::precedence))
}

impl Parser<'_> {
    /// Parses items until `closer` (which is consumed) or the end of input.
    pub(super) fn parse_items(&mut self, closer: Option<&str>) -> ParseResult<Vec<Node>> {
        let mut siblings: Vec<Sibling> = Vec::new();

        while let Some(token) = self.peek() {
            if let Some(closer) = closer
               && token.is_punct(closer)
            {
                self.pos += 1;
                break;
            }
            if token.is_punct(",") {
                self.pos += 1;
                continue;
            }
            let item = self.parse_item(&mut siblings)?;
            siblings.push(item);
        }

        Ok(siblings.into_iter().map(|s| s.node).collect())
    }

    /// Parses one item. Operators with no left operand adopt the previous
    /// item when it can serve as one.
    fn parse_item(&mut self, siblings: &mut Vec<Sibling>) -> ParseResult<Sibling> {
        let start = self.pos;
        let Some(token) = self.peek() else {
            return Err(ParseError::UnexpectedToken { token: String::new(),
                                                     span:  self.current_span(), });
        };

        if token.is_punct("\\") {
            return self.parse_fold(siblings);
        }

        if let Some(precedence) = leading_operator_precedence(token)
           && let Some(previous) = siblings.last()
           && previous.node.is_valid_left()
           && !is_open_lower(&previous.node, precedence)
           && let Some(previous) = siblings.pop()
        {
            let node = self.parse_operators(previous.node, LOWEST, true)?;
            return Ok(Sibling { node,
                                tokens: previous.tokens.start..self.pos });
        }

        let node = self.parse_expression(LOWEST, Position::Item)?;
        if self.pos == start {
            return Err(ParseError::UnexpectedToken { token: token.text.clone(),
                                                     span:  token.span, });
        }
        Ok(Sibling { node,
                     tokens: start..self.pos })
    }

    /// Parses `\`, taking a preceding block as the per-element map and the
    /// item before that as the combinator.
    fn parse_fold(&mut self, siblings: &mut Vec<Sibling>) -> ParseResult<Sibling> {
        let mut start = self.pos;
        let span = self.advance().map_or_else(|| self.current_span(), |t| t.span);

        let map = if matches!(siblings.last(), Some(Sibling { node: Node::Block(_), .. }))
                     && let Some(Sibling { node: Node::Block(block),
                                           tokens, }) = siblings.pop()
        {
            start = tokens.start;
            Some(block)
        } else {
            None
        };

        let combinator = match siblings.last() {
            Some(previous) if self.is_combinator(&previous.tokens) => {
                let range = previous.tokens.clone();
                siblings.pop();
                start = range.start;
                let source = self.tokens;
                Some(self.parse_template(&source[range], span)?)
            },
            _ => None,
        };

        let arg = self.parse_expression(0, Position::Operand)?;
        let node = Node::Prefix { op: PrefixOp::Fold,
                                  arg: Box::new(arg),
                                  extra: Extra::Fold { map, combinator },
                                  span };
        let node = self.parse_operators(node, LOWEST, false)?;
        Ok(Sibling { node,
                     tokens: start..self.pos })
    }

    /// A combinator is an item whose first token is an infix spelling.
    fn is_combinator(&self, tokens: &Range<usize>) -> bool {
        self.tokens
            .get(tokens.start)
            .is_some_and(|t| t.kind == TokenKind::Punctuation && InfixOp::from_spelling(&t.text).is_some())
    }

    /// Parses `tokens` once, between the reserved left and right operand
    /// names, into a reusable two-argument expression.
    pub(super) fn parse_template(&mut self, tokens: &[Token], span: Span) -> ParseResult<Template> {
        let mut wrapped = Vec::with_capacity(tokens.len() + 2);
        wrapped.push(Token::new(TokenKind::Variable, TEMPLATE_LEFT, span));
        wrapped.extend_from_slice(tokens);
        wrapped.push(Token::new(TokenKind::Variable, TEMPLATE_RIGHT, span));

        let mut inner = Parser::new(&wrapped, std::mem::take(&mut self.calls));
        let result = inner.parse_items(None);
        self.calls = inner.into_calls();
        let mut items = result?;

        match (items.pop(), items.is_empty()) {
            (Some(expr), true) => Ok(Template { expr: Box::new(expr),
                                               span }),
            _ => Err(ParseError::MalformedCombinator { text: tokens.iter()
                                                                   .map(|t| t.text.as_str())
                                                                   .collect::<Vec<_>>()
                                                                   .join(" "),
                                                       span }),
        }
    }

    /// Parses the items of a block whose `{` was already consumed.
    pub(super) fn parse_block_body(&mut self, param: String, span: Span) -> ParseResult<Block> {
        let body_span = self.current_span();
        let items = self.parse_items(Some("}"))?;
        Ok(Block { param,
                   body: Program::new(items, body_span),
                   span })
    }

    /// Parses the items of an array whose `[` was already consumed.
    ///
    /// At most one block may appear; it turns the array into a sequence.
    pub(super) fn parse_array_body(&mut self, span: Span) -> ParseResult<Node> {
        let body_span = self.current_span();
        let items = self.parse_items(Some("]"))?;
        if items.iter().filter(|item| matches!(item, Node::Block(_))).count() > 1 {
            return Err(ParseError::MultipleGenerators { span });
        }
        Ok(Node::Array { body: Program::new(items, body_span),
                         span })
    }
}

/// Returns `true` if `node` ends in an operand of an operator that binds more
/// loosely than `precedence`, so adopting it would regroup that operand.
fn is_open_lower(node: &Node, precedence: i32) -> bool {
    matches!(node, Node::Prefix { .. } | Node::Infix { .. })
    && node.operator_precedence().is_some_and(|p| p < precedence)
}
