use arn::{
    ast::QuoteKind,
    interpreter::lexer::{TokenKind, tokenize},
};

fn texts(source: &str) -> Vec<String> {
    tokenize(source).unwrap().into_iter().map(|t| t.text).collect()
}

#[test]
fn longest_punctuation_wins() {
    assert_eq!(texts("!!x :{ @: :="), ["!!", "x", ":{", "@:", ":="]);
    assert_eq!(texts("a:b"), ["a", ":", "b"]);
    assert_eq!(texts("$:{>4}"), ["$:", "{", ">", "4", "}"]);
}

#[test]
fn numerals_use_underscore_for_minus() {
    let tokens = tokenize("_3.5 e3 2e_1 _").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(kinds,
               [TokenKind::Integer, TokenKind::Integer, TokenKind::Integer, TokenKind::Variable]);
    assert_eq!(tokens[0].text, "_3.5");
    assert_eq!(tokens[2].text, "2e_1");
}

#[test]
fn strings_unescape_and_may_be_unterminated() {
    let tokens = tokenize(r#""a\"b\nc" "open"#).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String(QuoteKind::Double));
    assert_eq!(tokens[0].text, "a\"b\nc");
    assert_eq!(tokens[1].text, "open");
}

#[test]
fn a_trailing_backslash_stays_in_the_string() {
    let tokens = tokenize("\"abc\\").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String(QuoteKind::Double));
    assert_eq!(tokens[0].text, "abc\\");

    let tokens = tokenize("'ab\\").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].text, "ab\\");
}

#[test]
fn dictionary_strings_keep_their_quote() {
    let tokens = tokenize("'yt, bs!").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::String(QuoteKind::Single));
    assert_eq!(tokens[0].text, "yt, bs!");

    let tokens = tokenize("`ab` 1").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::String(QuoteKind::Backtick));
    assert_eq!(tokens[0].text, "ab");
}

#[test]
fn spans_track_lines_and_columns() {
    let tokens = tokenize("1\n  \"x\ny\" +\n\tz").unwrap();

    assert_eq!((tokens[0].span.line, tokens[0].span.column), (1, 1));
    assert_eq!((tokens[1].span.line, tokens[1].span.column), (2, 3));
    assert_eq!((tokens[2].span.line, tokens[2].span.column), (3, 4));
    assert_eq!((tokens[3].span.line, tokens[3].span.column), (4, 2));
}

#[test]
fn unknown_characters_are_lex_errors() {
    let err = tokenize("1 ¬").unwrap_err();

    assert_eq!(err.text, "¬");
    assert_eq!(err.span.column, 3);
}
