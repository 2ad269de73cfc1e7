use crate::{
    ast::{Extra, Identifier, InfixOp, Node, PrefixOp, Program, SuffixOp},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ARGUMENT, LOWEST, ParseResult, Parser, Position, is_closer},
    },
};

/// How an operand started, which decides what may follow it.
pub(super) enum Start {
    /// An ordinary operand; following operators are considered.
    Primary(Node),
    /// A block or definition; nothing may follow it within the item.
    Closed(Node),
    /// No operand was written; `_` stands in, and an operator that follows
    /// applies to it regardless of precedence.
    Implicit(Node),
}

impl Parser<'_> {
    /// Parses an operand and every operator that binds tighter than
    /// `min_precedence`.
    ///
    /// An operator of equal precedence is absorbed unless it is
    /// non-chaining, which makes `^` right associative and `+`/`-` left
    /// associative.
    pub(super) fn parse_expression(&mut self,
                                   min_precedence: i32,
                                   position: Position)
                                   -> ParseResult<Node> {
        match self.parse_operand(position)? {
            Start::Closed(node) => Ok(node),
            Start::Primary(node) => self.parse_operators(node, min_precedence, false),
            Start::Implicit(node) => self.parse_operators(node, min_precedence, true),
        }
    }

    fn parse_operand(&mut self, position: Position) -> ParseResult<Start> {
        let Some(token) = self.peek() else {
            return Ok(Start::Implicit(Node::implicit(self.current_span())));
        };
        let span = token.span;

        match token.kind {
            TokenKind::String(quote) => {
                self.pos += 1;
                Ok(Start::Primary(Node::StringLiteral { text: token.text.clone(),
                                                        quote,
                                                        span }))
            },
            TokenKind::Integer => {
                self.pos += 1;
                Ok(Start::Primary(Node::IntegerLiteral { text: token.text.clone(),
                                                         span }))
            },
            TokenKind::Variable => self.parse_identifier(token, position),
            TokenKind::Punctuation => self.parse_punctuation(token, position),
        }
    }

    fn parse_punctuation(&mut self, token: &Token, position: Position) -> ParseResult<Start> {
        let span = token.span;
        let implicit = || Ok(Start::Implicit(Node::implicit(span)));

        match token.text.as_str() {
            "(" => {
                self.pos += 1;
                let inner_span = self.current_span();
                let items = self.parse_items(Some(")"))?;
                Ok(Start::Primary(Node::Expression { inner: Program::new(items, inner_span),
                                                     span }))
            },
            "[" => {
                self.pos += 1;
                Ok(Start::Primary(self.parse_array_body(span)?))
            },
            "{" if position == Position::Right => implicit(),
            "{" => {
                self.pos += 1;
                Ok(Start::Closed(Node::Block(self.parse_block_body("_".to_string(), span)?)))
            },
            "\\" => implicit(),
            text => {
                if let Some(op) = PrefixOp::from_spelling(text) {
                    self.pos += 1;
                    return match op {
                        PrefixOp::Filter | PrefixOp::Any => self.parse_filter(op, token),
                        _ => {
                            let arg = self.parse_expression(op.precedence(), Position::Operand)?;
                            Ok(Start::Primary(Node::Prefix { op,
                                                             arg: Box::new(arg),
                                                             extra: Extra::None,
                                                             span }))
                        },
                    };
                }
                if InfixOp::from_spelling(text).is_some() || SuffixOp::from_spelling(text).is_some()
                {
                    return implicit();
                }
                if position != Position::Item && (is_closer(token) || text == ",") {
                    return implicit();
                }
                Err(ParseError::UnexpectedToken { token: text.to_string(),
                                                  span })
            },
        }
    }

    /// Parses `$` or `$:`, which must be followed by a block, then the
    /// collection to filter.
    fn parse_filter(&mut self, op: PrefixOp, token: &Token) -> ParseResult<Start> {
        let param = match (self.peek(), self.peek_at(1)) {
            (Some(open), _) if open.is_punct("{") => {
                self.pos += 1;
                "_".to_string()
            },
            (Some(name), Some(open)) if name.kind == TokenKind::Variable && open.is_punct("{") => {
                self.pos += 2;
                name.text.clone()
            },
            _ => {
                return Err(ParseError::MissingBlock { op:   token.text.clone(),
                                                      span: token.span, });
            },
        };
        let block_span = self.tokens[self.pos - 1].span;
        let block = self.parse_block_body(param, block_span)?;
        let arg = self.parse_expression(op.precedence(), Position::Operand)?;
        Ok(Start::Primary(Node::Prefix { op,
                                         arg: Box::new(arg),
                                         extra: Extra::Filter(block),
                                         span: token.span }))
    }

    /// Parses an identifier as a named block, a function definition, a call
    /// or a variable, in that order of preference.
    fn parse_identifier(&mut self, token: &Token, position: Position) -> ParseResult<Start> {
        self.pos += 1;
        let name = token.text.clone();
        let span = token.span;

        if position != Position::Right && self.peek_is("{") {
            self.pos += 1;
            return Ok(Start::Closed(Node::Block(self.parse_block_body(name, span)?)));
        }

        if self.at_definition_head() {
            return self.parse_definition(name, token).map(Start::Closed);
        }

        if let Some(&arity) = self.calls.get(&name) {
            let args = self.parse_arguments(arity)?;
            return Ok(Start::Primary(Node::Call { name, args, span }));
        }

        Ok(Start::Primary(Node::Variable { name, span }))
    }

    /// Returns `true` if the tokens ahead are `:=` or a parenthesized list
    /// followed by `:=`.
    fn at_definition_head(&self) -> bool {
        if self.peek_is(":=") {
            return true;
        }
        if !self.peek_is("(") {
            return false;
        }
        let mut depth = 0usize;
        for (offset, token) in self.tokens[self.pos..].iter().enumerate() {
            if token.is_punct("(") {
                depth += 1;
            } else if token.is_punct(")") {
                depth -= 1;
                if depth == 0 {
                    return self.peek_at(offset + 1).is_some_and(|t| t.is_punct(":="));
                }
            }
        }
        false
    }

    /// Parses `name(params) := body` or `name := body` after the name.
    ///
    /// The arity is recorded before the body is parsed so the body may call
    /// the function recursively.
    fn parse_definition(&mut self, name: String, token: &Token) -> ParseResult<Node> {
        let mut params = Vec::new();

        if self.peek_is("(") {
            self.pos += 1;
            while let Some(param) = self.advance() {
                if param.is_punct(")") {
                    break;
                }
                if param.is_punct(",") {
                    continue;
                }
                if param.kind != TokenKind::Variable {
                    return Err(ParseError::InvalidFunctionDefinition { name,
                                                                       span: token.span });
                }
                params.push(Identifier { name: param.text.clone(),
                                         span: param.span, });
            }
        }
        self.pos += 1;

        self.calls.insert(name.clone(), params.len());
        let body = self.parse_expression(LOWEST, Position::Operand)?;

        Ok(Node::FunctionDef { name,
                               params,
                               body: Box::new(body),
                               span: token.span })
    }

    /// Parses `count` call arguments. Arguments left out at the end of a group
    /// or of the input are `_`.
    pub(super) fn parse_arguments(&mut self, count: usize) -> ParseResult<Vec<Node>> {
        let mut args = Vec::with_capacity(count);
        for _ in 0..count {
            if self.at_boundary() {
                args.push(Node::implicit(self.current_span()));
            } else {
                args.push(self.parse_expression(ARGUMENT, Position::Argument)?);
            }
        }
        Ok(args)
    }
}
