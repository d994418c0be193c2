//! Integration tests for the stylesheet lexer.

use bilby_css::tokenizer::{Lexer, TokenKind};
use bilby_css::values::{Dimension, Unit};

/// Helper to lex a string and return the token kinds (EOF excluded)
fn lex(input: &str) -> Vec<TokenKind> {
    lex_full(input).into_iter().map(|l| l.kind).collect()
}

/// Helper returning the full lexemes, offsets and flags included
fn lex_full(input: &str) -> Vec<bilby_css::tokenizer::Lexeme> {
    let mut lexer = Lexer::with_source(input);
    let mut lexemes = Vec::new();
    loop {
        let lexeme = lexer.next_lexeme();
        if lexeme.is_eof() {
            break;
        }
        lexemes.push(lexeme);
    }
    lexemes
}

#[test]
fn test_ident() {
    assert_eq!(lex("color"), vec![TokenKind::Ident("color".into())]);
}

#[test]
fn test_ident_with_hyphen() {
    assert_eq!(
        lex("background-color"),
        vec![TokenKind::Ident("background-color".into())]
    );
}

#[test]
fn test_leading_hyphen_ident() {
    assert_eq!(lex("-webkit-box"), vec![TokenKind::Ident("-webkit-box".into())]);
}

#[test]
fn test_function() {
    assert_eq!(
        lex("rgb("),
        vec![TokenKind::Function("rgb".into())]
    );
}

#[test]
fn test_at_keyword() {
    assert_eq!(lex("@media"), vec![TokenKind::AtKeyword("media".into())]);
}

#[test]
fn test_hash() {
    assert_eq!(lex("#header"), vec![TokenKind::Hash("header".into())]);
    // Hex colors start with a digit, which a plain identifier cannot.
    assert_eq!(lex("#1a2b3c"), vec![TokenKind::Hash("1a2b3c".into())]);
}

#[test]
fn test_strings() {
    assert_eq!(
        lex("\"hello\" 'world'"),
        vec![
            TokenKind::QuotedString("hello".into()),
            TokenKind::QuotedString("world".into()),
        ]
    );
}

#[test]
fn test_unterminated_string_is_lenient() {
    assert_eq!(lex("\"oops"), vec![TokenKind::QuotedString("oops".into())]);
}

#[test]
fn test_numbers() {
    assert_eq!(lex("42"), vec![TokenKind::Number(42.0)]);
    assert_eq!(lex(".5"), vec![TokenKind::Number(0.5)]);
    assert_eq!(lex("-1.25"), vec![TokenKind::Number(-1.25)]);
    assert_eq!(lex("2e3"), vec![TokenKind::Number(2000.0)]);
}

#[test]
fn test_dimensions() {
    assert_eq!(
        lex("12px"),
        vec![TokenKind::Dimension(Dimension::new(12.0, Unit::Px))]
    );
    assert_eq!(
        lex("50%"),
        vec![TokenKind::Dimension(Dimension::new(50.0, Unit::Percent))]
    );
    assert_eq!(
        lex("1.5s"),
        vec![TokenKind::Dimension(Dimension::new(1.5, Unit::S))]
    );
    assert_eq!(
        lex("90deg"),
        vec![TokenKind::Dimension(Dimension::new(90.0, Unit::Deg))]
    );
}

#[test]
fn test_unknown_unit_suffix_lexes_separately() {
    // Only a known unit makes a dimension; `2n+1` must stay three tokens
    // for the nth-child argument grammar.
    assert_eq!(
        lex("2n+1"),
        vec![
            TokenKind::Number(2.0),
            TokenKind::Ident("n".into()),
            TokenKind::Number(1.0),
        ]
    );
    assert_eq!(
        lex("2n-1"),
        vec![TokenKind::Number(2.0), TokenKind::Ident("n-1".into())]
    );
    assert_eq!(
        lex("-n+3"),
        vec![TokenKind::Ident("-n".into()), TokenKind::Number(3.0)]
    );
}

#[test]
fn test_attribute_operators() {
    assert_eq!(
        lex("~= |= ^= $= *= ="),
        vec![
            TokenKind::Includes,
            TokenKind::DashMatch,
            TokenKind::PrefixMatch,
            TokenKind::SuffixMatch,
            TokenKind::SubstringMatch,
            TokenKind::Equals,
        ]
    );
}

#[test]
fn test_single_char_operators() {
    assert_eq!(
        lex("> ~ | * . : :: ; , ! /"),
        vec![
            TokenKind::Greater,
            TokenKind::Tilde,
            TokenKind::Pipe,
            TokenKind::Star,
            TokenKind::Dot,
            TokenKind::Colon,
            TokenKind::DoubleColon,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Bang,
            TokenKind::Slash,
        ]
    );
}

#[test]
fn test_unquoted_url() {
    assert_eq!(
        lex("url(images/bg.png)"),
        vec![TokenKind::Url("images/bg.png".into())]
    );
}

#[test]
fn test_quoted_url_is_a_function() {
    assert_eq!(
        lex("url(\"bg.png\")"),
        vec![
            TokenKind::Function("url".into()),
            TokenKind::QuotedString("bg.png".into()),
            TokenKind::RightParen,
        ]
    );
}

#[test]
fn test_escapes_in_identifiers() {
    // \66 is 'f'; one whitespace after the hex digits is consumed.
    assert_eq!(lex("\\66 oo"), vec![TokenKind::Ident("foo".into())]);
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        lex("a /* ignored */ b"),
        vec![TokenKind::Ident("a".into()), TokenKind::Ident("b".into())]
    );
}

#[test]
fn test_ws_before_flag() {
    // `a:hover` vs `a :hover` differ only in the colon's ws_before flag.
    let tight = lex_full("a:hover");
    assert!(!tight[1].ws_before);
    let spaced = lex_full("a :hover");
    assert!(spaced[1].ws_before);
    // A comment counts as whitespace.
    let commented = lex_full("a/**/:hover");
    assert!(commented[1].ws_before);
}

#[test]
fn test_offsets_and_lengths() {
    let lexemes = lex_full("color: red;");
    assert_eq!((lexemes[0].offset, lexemes[0].len), (0, 5));
    assert_eq!((lexemes[1].offset, lexemes[1].len), (5, 1));
    assert_eq!((lexemes[2].offset, lexemes[2].len), (7, 3));
    assert_eq!((lexemes[3].offset, lexemes[3].len), (10, 1));
}

#[test]
fn test_rebased_offsets_round_trip() {
    // Lexing a substring with its original base offset reproduces the
    // same lexemes as lexing it in place.
    let source = "margin: 10px  20px";
    let full = lex_full(source);
    let value = &full[2..];

    let mut lexer = Lexer::new();
    lexer.set_source_with_offset("10px  20px", 8);
    let mut relexed = Vec::new();
    loop {
        let lexeme = lexer.next_lexeme();
        if lexeme.is_eof() {
            break;
        }
        relexed.push(lexeme);
    }
    assert_eq!(relexed, value);
}

#[test]
fn test_push_back() {
    let mut lexer = Lexer::with_source("a b");
    let first = lexer.next_lexeme();
    lexer.push_back(first.clone());
    assert_eq!(lexer.next_lexeme(), first);
    assert_eq!(lexer.next_lexeme().kind, TokenKind::Ident("b".into()));
}

#[test]
fn test_stray_characters_are_skipped() {
    // A lone '#' or '^' is not part of the grammar and produces nothing.
    assert_eq!(lex("# ^ a"), vec![TokenKind::Ident("a".into())]);
}
