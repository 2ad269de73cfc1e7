use crate::{
    ast::{BaseCode, Extra, InfixOp, Node, SuffixOp},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser, Position},
    },
};

impl Parser<'_> {
    /// Applies infix and suffix operators to `left` while they bind tighter
    /// than `min_precedence`.
    ///
    /// With `force_first`, the first operator applies regardless of its
    /// precedence. This is how an operator written without a left operand
    /// attaches to the implicit `_`.
    pub(super) fn parse_operators(&mut self,
                                  mut left: Node,
                                  min_precedence: i32,
                                  force_first: bool)
                                  -> ParseResult<Node> {
        let mut force = force_first;

        while let Some(token) = self.peek() {
            if token.kind != TokenKind::Punctuation {
                break;
            }
            let infix = InfixOp::from_spelling(&token.text);
            let suffix = SuffixOp::from_spelling(&token.text);
            let (precedence, chaining) = match (infix, suffix) {
                (Some(op), _) => (op.precedence(), !op.is_non_chaining()),
                (None, Some(op)) => (op.precedence(), true),
                (None, None) => break,
            };
            let binds = precedence > min_precedence || (precedence == min_precedence && chaining);
            if !force && !binds {
                break;
            }
            force = false;
            self.pos += 1;

            left = match (infix, suffix) {
                (Some(op), _) => self.parse_infix(left, op, token)?,
                (None, Some(op)) => self.parse_suffix(left, op, token)?,
                (None, None) => break,
            };
        }

        Ok(left)
    }

    fn parse_infix(&mut self, left: Node, op: InfixOp, token: &Token) -> ParseResult<Node> {
        let span = token.span;
        let mut extra = Extra::None;

        match op {
            InfixOp::Call => return self.parse_call_target(left, token),
            InfixOp::Zip => {
                if let Some(next) = self.peek()
                   && next.kind == TokenKind::Punctuation
                   && InfixOp::from_spelling(&next.text).is_some()
                {
                    self.pos += 1;
                    extra = Extra::Zip(self.parse_template(std::slice::from_ref(next), span)?);
                    if self.at_boundary() {
                        return Err(ParseError::IncompleteZip { span });
                    }
                }
            },
            _ => {},
        }

        let right = self.parse_expression(op.precedence(), Position::Right)?;
        Ok(Node::Infix { op,
                         left: Box::new(left),
                         right: Box::new(right),
                         extra,
                         span })
    }

    /// Parses the function after `.`, which receives the left operand as its
    /// first argument.
    fn parse_call_target(&mut self, left: Node, token: &Token) -> ParseResult<Node> {
        let span = token.span;
        let target = self.peek()
                         .filter(|t| t.kind == TokenKind::Variable)
                         .and_then(|t| self.calls.get(&t.text).map(|&arity| (t, arity)));
        let Some((name, arity)) = target.filter(|&(_, arity)| arity > 0) else {
            return Err(ParseError::InvalidCallTarget { span });
        };
        self.pos += 1;

        let args = self.parse_arguments(arity - 1)?;
        let call = Node::Call { name: name.text.clone(),
                                args,
                                span: name.span };
        Ok(Node::Infix { op: InfixOp::Call,
                         left: Box::new(left),
                         right: Box::new(call),
                         extra: Extra::None,
                         span })
    }

    fn parse_suffix(&mut self, arg: Node, op: SuffixOp, token: &Token) -> ParseResult<Node> {
        let extra = if op == SuffixOp::Base {
            self.parse_base_directive(token)?
        } else {
            Extra::None
        };
        Ok(Node::Suffix { op,
                          arg: Box::new(arg),
                          extra,
                          span: token.span })
    }

    /// Parses the directive after `;`: an optional pad width followed by a
    /// word of conversion codes, such as `8b` or `Hd`.
    fn parse_base_directive(&mut self, token: &Token) -> ParseResult<Extra> {
        let invalid = |directive: &str| ParseError::InvalidBaseDirective { directive: directive.to_string(),
                                                                           span:      token.span, };

        let mut width = 0;
        if let Some(numeral) = self.peek()
           && numeral.kind == TokenKind::Integer
        {
            width = numeral.text.parse().map_err(|_| invalid(&numeral.text))?;
            self.pos += 1;
        }

        let Some(word) = self.peek().filter(|t| t.kind == TokenKind::Variable) else {
            return Err(invalid(self.peek().map_or("", |t| t.text.as_str())));
        };
        self.pos += 1;

        let codes = word.text
                        .chars()
                        .map(BaseCode::from_char)
                        .collect::<Option<Vec<_>>>()
                        .ok_or_else(|| invalid(&word.text))?;
        Ok(Extra::Base { width, codes })
    }
}
