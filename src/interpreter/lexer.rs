use logos::{Lexer, Logos};
use tracing::trace;

use crate::{
    ast::{QuoteKind, Span},
    error::LexError,
};

/// Position bookkeeping carried through lexing.
#[derive(Debug, Clone, Copy)]
pub struct LexerExtras {
    /// Current line, starting at 1.
    pub line:       usize,
    /// Byte offset at which the current line starts.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// Raw lexemes recognised by the generated lexer.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\f]+")]
enum Lexeme {
    /// `"text"`, possibly unterminated or ending in a lone backslash.
    #[regex(r#""([^"\\]|\\[^\n])*\\?"?"#, text, allow_greedy = true)]
    Text(String),
    /// `'words'` or `` `words` ``, possibly unterminated.
    #[regex(r"['`]([^'`\\]|\\[^\n])*\\?['`]?", dictionary, allow_greedy = true)]
    Dictionary((QuoteKind, String)),
    /// Numerals such as `12`, `.5`, `_3`, `1e9` or `e3`.
    #[regex(r"_?[0-9]*\.?[0-9]+(e_?[0-9]+)?", |lex| lex.slice().to_string(), priority = 10)]
    #[regex(r"_?e[0-9]+", |lex| lex.slice().to_string(), priority = 10)]
    Number(String),
    /// Variable and function names.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Operators and grouping symbols. Two-character spellings win over their
    /// one-character prefixes.
    #[token("!!", punctuation)]
    #[token(":v", punctuation)]
    #[token(":^", punctuation)]
    #[token("++", punctuation)]
    #[token("--", punctuation)]
    #[token(":*", punctuation)]
    #[token(":/", punctuation)]
    #[token(":+", punctuation)]
    #[token(":-", punctuation)]
    #[token(":>", punctuation)]
    #[token(":<", punctuation)]
    #[token("|:", punctuation)]
    #[token("$:", punctuation)]
    #[token("<=", punctuation)]
    #[token(">=", punctuation)]
    #[token("!=", punctuation)]
    #[token("||", punctuation)]
    #[token("&&", punctuation)]
    #[token(":|", punctuation)]
    #[token("->", punctuation)]
    #[token("=>", punctuation)]
    #[token(":!", punctuation)]
    #[token(":i", punctuation)]
    #[token("@:", punctuation)]
    #[token(":_", punctuation)]
    #[token(":{", punctuation)]
    #[token(":}", punctuation)]
    #[token(":@", punctuation)]
    #[token(":n", punctuation)]
    #[token(":s", punctuation)]
    #[token(".{", punctuation)]
    #[token(".}", punctuation)]
    #[token(".|", punctuation)]
    #[token("..", punctuation)]
    #[token("^*", punctuation)]
    #[token(":=", punctuation)]
    #[token("!", punctuation)]
    #[token("$", punctuation)]
    #[token("#", punctuation)]
    #[token("\\", punctuation)]
    #[token("=", punctuation)]
    #[token("<", punctuation)]
    #[token(">", punctuation)]
    #[token("+", punctuation)]
    #[token("-", punctuation)]
    #[token("*", punctuation)]
    #[token("/", punctuation)]
    #[token("%", punctuation)]
    #[token("^", punctuation)]
    #[token("|", punctuation)]
    #[token("@", punctuation)]
    #[token(".", punctuation)]
    #[token("~", punctuation)]
    #[token("&", punctuation)]
    #[token("?", punctuation)]
    #[token("{", punctuation)]
    #[token("}", punctuation)]
    #[token("(", punctuation)]
    #[token(")", punctuation)]
    #[token("[", punctuation)]
    #[token("]", punctuation)]
    #[token(",", punctuation)]
    #[token(";", punctuation)]
    #[token(":", punctuation)]
    Punctuation(String),
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
        logos::Skip
    })]
    Newline,
}

fn punctuation(lex: &Lexer<Lexeme>) -> String {
    lex.slice().to_string()
}

/// Reads a quoted body up to its closing quote, resolving escapes.
///
/// An escaped quote becomes the quote itself and `\n` becomes a newline in
/// double-quoted strings. Other backslashes are kept.
fn unquote(body: &str, closing: &[char], newline_escape: bool) -> String {
    let mut text = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if closing.contains(&c) {
            break;
        }
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some(q) if closing.contains(&q) => text.push(q),
            Some('n') if newline_escape => text.push('\n'),
            Some(other) => {
                text.push('\\');
                text.push(other);
            },
            None => text.push('\\'),
        }
    }
    text
}

fn text(lex: &Lexer<Lexeme>) -> String {
    unquote(&lex.slice()[1..], &['"'], true)
}

fn dictionary(lex: &Lexer<Lexeme>) -> (QuoteKind, String) {
    let mut chars = lex.slice().chars();
    let quote = chars.next().map_or(QuoteKind::Single, QuoteKind::from_char);
    (quote, unquote(chars.as_str(), &['\'', '`'], false))
}

/// The category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A string literal; the quote decides whether it is decoded through the
    /// dictionary.
    String(QuoteKind),
    /// A numeral.
    Integer,
    /// An identifier naming a variable or a function.
    Variable,
    /// An operator or grouping symbol.
    Punctuation,
}

/// A token with its text and the position it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Punctuation spelling, identifier, numeral, or the unquoted string body.
    pub text: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self { kind,
               text: text.into(),
               span }
    }

    /// Returns `true` if this is the punctuation token `spelling`.
    #[must_use]
    pub fn is_punct(&self, spelling: &str) -> bool {
        self.kind == TokenKind::Punctuation && self.text == spelling
    }
}

/// Splits source text into tokens.
///
/// Whitespace separates tokens and is otherwise ignored. Strings may be left
/// unterminated, in which case they run to the end of the source.
///
/// # Errors
/// Returns a [`LexError`] at the first character that starts no token.
///
/// # Example
/// ```
/// use arn::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("+\\[1 _2]").unwrap();
/// let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
///
/// assert_eq!(texts, ["+", "\\", "[", "1", "_2", "]"]);
/// assert_eq!(tokens[4].kind, TokenKind::Integer);
/// assert_eq!(tokens[4].span.column, 6);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexeme::lexer_with_extras(source, LexerExtras::default());
    let mut tokens = Vec::new();

    while let Some(lexeme) = lexer.next() {
        let range = lexer.span();
        let extras = lexer.extras;
        let column = source[extras.line_start..range.start].chars().count() + 1;
        let span = Span::new(extras.line, column);

        let (kind, text) = match lexeme {
            Ok(Lexeme::Text(text)) => (TokenKind::String(QuoteKind::Double), text),
            Ok(Lexeme::Dictionary((quote, text))) => (TokenKind::String(quote), text),
            Ok(Lexeme::Number(text)) => (TokenKind::Integer, text),
            Ok(Lexeme::Identifier(text)) => (TokenKind::Variable, text),
            Ok(Lexeme::Punctuation(text)) => (TokenKind::Punctuation, text),
            Ok(Lexeme::Newline) => continue,
            Err(()) => {
                return Err(LexError { text: lexer.slice().to_string(),
                                      span });
            },
        };

        let slice = lexer.slice();
        if let Some(last) = slice.rfind('\n') {
            lexer.extras.line += slice.matches('\n').count();
            lexer.extras.line_start = range.start + last + 1;
        }

        tokens.push(Token { kind, text, span });
    }

    trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}
