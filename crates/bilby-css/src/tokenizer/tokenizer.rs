//! The stylesheet lexer.
//!
//! Converts raw stylesheet text into a stream of [`Lexeme`]s on demand.
//! Whitespace and `/* */` comments are consumed between lexemes and
//! recorded as a `ws_before` flag on the following lexeme. Unrecognized
//! characters are skipped without producing a token — the lexer itself
//! never fails.

use std::str::FromStr;

use super::token::{Lexeme, TokenKind};
use crate::values::{Dimension, Unit};

/// Streaming lexer over stylesheet source text.
///
/// `set_source` resets the cursor; `next_lexeme` returns the next lexeme
/// or an EOF sentinel. A single-slot pushback (`push_back`) lets the
/// declaration parser re-offer one lexeme when it detects that an
/// identifier actually starts the next declaration.
#[derive(Debug, Default)]
pub struct Lexer {
    /// The input as code points. Offsets are character positions.
    input: Vec<char>,
    /// Current position in the input.
    position: usize,
    /// Base added to emitted offsets, so substrings re-lex with their
    /// original positions.
    base: usize,
    /// Single-lexeme pushback buffer.
    pushed: Option<Lexeme>,
}

impl Lexer {
    /// Create a lexer with no source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a lexer over the given source.
    #[must_use]
    pub fn with_source(text: &str) -> Self {
        let mut lexer = Self::new();
        lexer.set_source(text);
        lexer
    }

    /// Reset the lexer over new source text, position 0.
    pub fn set_source(&mut self, text: &str) {
        self.set_source_with_offset(text, 0);
    }

    /// Reset the lexer over new source text whose first character sits at
    /// `base` in some enclosing document. Emitted offsets are rebased, so
    /// re-lexing a stored declaration substring reproduces the original
    /// lexeme positions.
    pub fn set_source_with_offset(&mut self, text: &str, base: usize) {
        self.input = text.chars().collect();
        self.position = 0;
        self.base = base;
        self.pushed = None;
    }

    /// Re-offer a lexeme; the next `next_lexeme` call returns it.
    /// Only one lexeme of lookahead is supported.
    pub fn push_back(&mut self, lexeme: Lexeme) {
        debug_assert!(self.pushed.is_none(), "single-slot pushback already full");
        self.pushed = Some(lexeme);
    }

    /// The source text between two emitted offsets, trimmed. Used to
    /// capture a declaration's raw value for diagnostics and round-trip
    /// re-lexing.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> String {
        let from = start.saturating_sub(self.base).min(self.input.len());
        let to = end.saturating_sub(self.base).clamp(from, self.input.len());
        self.input[from..to].iter().collect::<String>().trim().to_owned()
    }

    /// Produce the next lexeme, or the EOF sentinel at end of input.
    pub fn next_lexeme(&mut self) -> Lexeme {
        if let Some(lexeme) = self.pushed.take() {
            return lexeme;
        }

        let mut ws = false;
        loop {
            ws |= self.consume_whitespace_and_comments();
            let start = self.position;
            let Some(c) = self.consume() else {
                return Lexeme::new(TokenKind::Eof, self.base + start, 0, ws);
            };

            let kind = match c {
                '"' | '\'' => self.consume_string(c),
                '#' => {
                    if self.peek().is_some_and(is_hash_code_point) {
                        TokenKind::Hash(self.consume_ident_sequence())
                    } else {
                        // A lone '#' is not part of the grammar.
                        continue;
                    }
                }
                '(' => TokenKind::LeftParen,
                ')' => TokenKind::RightParen,
                '[' => TokenKind::LeftBracket,
                ']' => TokenKind::RightBracket,
                '{' => TokenKind::LeftBrace,
                '}' => TokenKind::RightBrace,
                ';' => TokenKind::Semicolon,
                ',' => TokenKind::Comma,
                ':' => {
                    if self.peek() == Some(':') {
                        let _ = self.consume();
                        TokenKind::DoubleColon
                    } else {
                        TokenKind::Colon
                    }
                }
                '>' => TokenKind::Greater,
                '=' => TokenKind::Equals,
                '!' => TokenKind::Bang,
                '/' => TokenKind::Slash,
                '~' => self.operator_or(TokenKind::Includes, TokenKind::Tilde),
                '|' => self.operator_or(TokenKind::DashMatch, TokenKind::Pipe),
                '*' => self.operator_or(TokenKind::SubstringMatch, TokenKind::Star),
                '^' => {
                    if self.peek() == Some('=') {
                        let _ = self.consume();
                        TokenKind::PrefixMatch
                    } else {
                        continue;
                    }
                }
                '$' => {
                    if self.peek() == Some('=') {
                        let _ = self.consume();
                        TokenKind::SuffixMatch
                    } else {
                        continue;
                    }
                }
                '+' => {
                    if self.would_start_number() {
                        self.reconsume();
                        self.consume_numeric()
                    } else {
                        TokenKind::Plus
                    }
                }
                '-' => {
                    self.reconsume();
                    if self.would_start_number() {
                        self.consume_numeric()
                    } else if self.would_start_ident_sequence() {
                        self.consume_ident_like()
                    } else {
                        let _ = self.consume();
                        continue;
                    }
                }
                '.' => {
                    if self.would_start_number() {
                        self.reconsume();
                        self.consume_numeric()
                    } else {
                        TokenKind::Dot
                    }
                }
                '@' => {
                    if self.would_start_ident_sequence() {
                        TokenKind::AtKeyword(self.consume_ident_sequence())
                    } else {
                        continue;
                    }
                }
                '\\' => {
                    if is_valid_escape(Some('\\'), self.peek()) {
                        self.reconsume();
                        self.consume_ident_like()
                    } else {
                        continue;
                    }
                }
                c if c.is_ascii_digit() => {
                    self.reconsume();
                    self.consume_numeric()
                }
                c if is_ident_start_code_point(c) => {
                    self.reconsume();
                    self.consume_ident_like()
                }
                // Anything else is skipped with no token produced.
                _ => continue,
            };

            return Lexeme::new(kind, self.base + start, self.position - start, ws);
        }
    }

    /// Consume whitespace and comments; returns true if any were present.
    fn consume_whitespace_and_comments(&mut self) -> bool {
        let start = self.position;
        loop {
            while self.peek().is_some_and(is_whitespace) {
                let _ = self.consume();
            }
            if self.peek() == Some('/') && self.peek_at(1) == Some('*') {
                let _ = self.consume(); // /
                let _ = self.consume(); // *
                loop {
                    match self.consume() {
                        Some('*') if self.peek() == Some('/') => {
                            let _ = self.consume();
                            break;
                        }
                        Some(_) => {}
                        None => break,
                    }
                }
            } else {
                break;
            }
        }
        self.position != start
    }

    /// `<op>=` two-character operator, or the single-character fallback.
    fn operator_or(&mut self, with_equals: TokenKind, without: TokenKind) -> TokenKind {
        if self.peek() == Some('=') {
            let _ = self.consume();
            with_equals
        } else {
            without
        }
    }

    /// Consume a quoted string. Lenient: an unterminated string or a raw
    /// newline ends the string with the value collected so far.
    fn consume_string(&mut self, quote: char) -> TokenKind {
        let mut value = String::new();
        loop {
            match self.consume() {
                Some(c) if c == quote => return TokenKind::QuotedString(value),
                None => return TokenKind::QuotedString(value),
                Some('\n') => {
                    self.reconsume();
                    return TokenKind::QuotedString(value);
                }
                Some('\\') => match self.peek() {
                    None => {}
                    Some('\n') => {
                        let _ = self.consume();
                    }
                    Some(_) => {
                        if let Some(c) = self.consume_escaped_code_point() {
                            value.push(c);
                        }
                    }
                },
                Some(c) => value.push(c),
            }
        }
    }

    /// Consume a number plus optional unit suffix.
    fn consume_numeric(&mut self) -> TokenKind {
        let value = self.consume_number();

        if self.peek() == Some('%') {
            let _ = self.consume();
            return TokenKind::Dimension(Dimension::new(value, Unit::Percent));
        }

        if self.would_start_ident_sequence() {
            // Only a known unit suffix makes a dimension; otherwise the
            // identifier lexes separately (e.g. the `n` of `2n+1`).
            let mark = self.position;
            let suffix = self.consume_ident_sequence();
            if let Ok(unit) = Unit::from_str(&suffix) {
                return TokenKind::Dimension(Dimension::new(value, unit));
            }
            self.position = mark;
        }

        TokenKind::Number(value)
    }

    /// Consume a number: optional sign, digits, optional fraction,
    /// optional exponent.
    fn consume_number(&mut self) -> f32 {
        let mut repr = String::new();

        if self.peek() == Some('+') || self.peek() == Some('-') {
            repr.extend(self.consume());
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            repr.extend(self.consume());
        }
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            repr.extend(self.consume()); // .
            repr.extend(self.consume());
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                repr.extend(self.consume());
            }
        }
        if self.peek() == Some('e') || self.peek() == Some('E') {
            let next = self.peek_at(1);
            let has_sign = next == Some('+') || next == Some('-');
            let digit_pos = if has_sign { 2 } else { 1 };
            if self.peek_at(digit_pos).is_some_and(|c| c.is_ascii_digit()) {
                repr.extend(self.consume()); // e or E
                if has_sign {
                    repr.extend(self.consume());
                }
                repr.extend(self.consume());
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    repr.extend(self.consume());
                }
            }
        }

        repr.parse().unwrap_or(0.0)
    }

    /// Consume an ident-like token: identifier, function, or url.
    fn consume_ident_like(&mut self) -> TokenKind {
        let name = self.consume_ident_sequence();

        if name.eq_ignore_ascii_case("url") && self.peek() == Some('(') {
            let _ = self.consume(); // (
            while self.peek().is_some_and(is_whitespace) {
                let _ = self.consume();
            }
            return match self.peek() {
                // `url("...")` is a function token; the string lexes next.
                Some('"' | '\'') => TokenKind::Function(name),
                _ => self.consume_url_body(),
            };
        }

        if self.peek() == Some('(') {
            let _ = self.consume();
            return TokenKind::Function(name);
        }

        TokenKind::Ident(name)
    }

    /// Consume the raw body of an unquoted `url(...)` up to the closing
    /// parenthesis. Lenient on malformed bodies: remnants are consumed
    /// and whatever was collected is the value.
    fn consume_url_body(&mut self) -> TokenKind {
        let mut value = String::new();
        loop {
            match self.consume() {
                Some(')') | None => return TokenKind::Url(value),
                Some(c) if is_whitespace(c) => {
                    while self.peek().is_some_and(is_whitespace) {
                        let _ = self.consume();
                    }
                    match self.peek() {
                        Some(')') => {
                            let _ = self.consume();
                            return TokenKind::Url(value);
                        }
                        None => return TokenKind::Url(value),
                        _ => {
                            self.consume_bad_url_remnants();
                            return TokenKind::Url(value);
                        }
                    }
                }
                Some('"' | '\'' | '(') => {
                    self.consume_bad_url_remnants();
                    return TokenKind::Url(value);
                }
                Some('\\') => {
                    if is_valid_escape(Some('\\'), self.peek()) {
                        if let Some(c) = self.consume_escaped_code_point() {
                            value.push(c);
                        }
                    } else {
                        self.consume_bad_url_remnants();
                        return TokenKind::Url(value);
                    }
                }
                Some(c) => value.push(c),
            }
        }
    }

    fn consume_bad_url_remnants(&mut self) {
        loop {
            match self.consume() {
                Some(')') | None => return,
                Some('\\') => {
                    if is_valid_escape(Some('\\'), self.peek()) {
                        let _ = self.consume_escaped_code_point();
                    }
                }
                _ => {}
            }
        }
    }

    /// Consume an identifier sequence, handling escapes.
    fn consume_ident_sequence(&mut self) -> String {
        let mut result = String::new();
        loop {
            match self.consume() {
                Some(c) if is_ident_code_point(c) => result.push(c),
                Some('\\') if is_valid_escape(Some('\\'), self.peek()) => {
                    if let Some(c) = self.consume_escaped_code_point() {
                        result.push(c);
                    }
                }
                Some(_) => {
                    self.reconsume();
                    return result;
                }
                None => return result,
            }
        }
    }

    /// Consume an escaped code point after a `\`.
    fn consume_escaped_code_point(&mut self) -> Option<char> {
        match self.consume() {
            Some(c) if c.is_ascii_hexdigit() => {
                let mut hex = c.to_string();
                for _ in 0..5 {
                    if self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                        hex.extend(self.consume());
                    } else {
                        break;
                    }
                }
                if self.peek().is_some_and(is_whitespace) {
                    let _ = self.consume();
                }
                let code_point = u32::from_str_radix(&hex, 16).unwrap_or(0xFFFD);
                if code_point == 0 || (0xD800..=0xDFFF).contains(&code_point) || code_point > 0x0010_FFFF
                {
                    Some('\u{FFFD}')
                } else {
                    char::from_u32(code_point)
                }
            }
            None => Some('\u{FFFD}'),
            Some(c) => Some(c),
        }
    }

    fn would_start_ident_sequence(&self) -> bool {
        self.would_start_ident_sequence_with(self.peek())
    }

    fn would_start_ident_sequence_with(&self, first: Option<char>) -> bool {
        match first {
            Some('-') => {
                let second = self.peek_at(1);
                second.is_some_and(is_ident_start_code_point)
                    || second == Some('-')
                    || is_valid_escape(second, self.peek_at(2))
            }
            Some(c) if is_ident_start_code_point(c) => true,
            Some('\\') => is_valid_escape(Some('\\'), self.peek_at(1)),
            _ => false,
        }
    }

    fn would_start_number(&self) -> bool {
        match self.peek() {
            Some('+' | '-') => {
                let second = self.peek_at(1);
                if second.is_some_and(|c| c.is_ascii_digit()) {
                    return true;
                }
                second == Some('.') && self.peek_at(2).is_some_and(|c| c.is_ascii_digit())
            }
            Some('.') => self.peek_at(1).is_some_and(|c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    /// Consume and return the next character.
    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.position).copied();
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    /// Put back the last consumed character.
    fn reconsume(&mut self) {
        if self.position > 0 {
            self.position -= 1;
        }
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Peek at a character at an offset from the current position.
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }
}

/// A newline, tab, space, carriage return, or form feed.
fn is_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\t' | ' ' | '\r' | '\x0C')
}

/// A letter, a non-ASCII code point, or `_`.
fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// An ident-start code point, a digit, or `-`.
fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}

/// Anything that may follow `#`: hex colors like `#123` begin with a
/// digit, so plain ident code points are not enough.
fn is_hash_code_point(c: char) -> bool {
    is_ident_code_point(c)
}

/// `\` followed by anything but a newline.
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    first == Some('\\') && second != Some('\n')
}
