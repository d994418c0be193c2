//! Lexeme types produced by the stylesheet lexer.
//!
//! A [`Lexeme`] is a classified, positioned fragment of source text: a
//! token kind (carrying any parsed value), a byte offset into the source,
//! and a length. Equality and hashing consider kind, offset, and length —
//! the preceded-by-whitespace flag is positional metadata only.

use core::fmt;
use std::hash::{Hash, Hasher};
use std::mem::discriminant;

use crate::values::Dimension;

/// The kind of a lexeme, carrying its parsed value where one exists.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// An identifier, e.g. `color` or `solid`.
    Ident(String),
    /// A function name followed by `(`, e.g. `rgb(` or `linear-gradient(`.
    /// The value excludes the parenthesis.
    Function(String),
    /// An at-keyword, e.g. `@media`. The value excludes the `@`.
    AtKeyword(String),
    /// A hash token, e.g. `#fff` or `#main`. The value excludes the `#`.
    Hash(String),
    /// A quoted string, single or double. The value excludes the quotes.
    QuotedString(String),
    /// The body of a `url(...)` token, unquoted and trimmed.
    Url(String),
    /// A unitless number.
    Number(f32),
    /// A number with a unit suffix (including `%`).
    Dimension(Dimension),
    /// `:`
    Colon,
    /// `::`
    DoubleColon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `>` — child combinator.
    Greater,
    /// `+` — adjacent-sibling combinator (when not a number sign).
    Plus,
    /// `~` — sibling combinator (when not part of `~=`).
    Tilde,
    /// `|` — namespace separator (when not part of `|=`).
    Pipe,
    /// `/` — separator in shorthand values such as `border-radius`.
    Slash,
    /// `!` — start of an `!important` annotation.
    Bang,
    /// `.` — class-selector marker (when not a number start).
    Dot,
    /// `*` — universal selector (when not part of `*=`).
    Star,
    /// `=` — attribute equals operator.
    Equals,
    /// `~=` — attribute list-contains operator.
    Includes,
    /// `|=` — attribute equals-with-hyphen operator.
    DashMatch,
    /// `^=` — attribute starts-with operator.
    PrefixMatch,
    /// `$=` — attribute ends-with operator.
    SuffixMatch,
    /// `*=` — attribute contains operator.
    SubstringMatch,
    /// End of input sentinel.
    Eof,
}

impl TokenKind {
    /// The value-free type of this token, used for expectation checks.
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        match self {
            Self::Ident(_) => TokenType::Ident,
            Self::Function(_) => TokenType::Function,
            Self::AtKeyword(_) => TokenType::AtKeyword,
            Self::Hash(_) => TokenType::Hash,
            Self::QuotedString(_) => TokenType::QuotedString,
            Self::Url(_) => TokenType::Url,
            Self::Number(_) => TokenType::Number,
            Self::Dimension(_) => TokenType::Dimension,
            Self::Colon => TokenType::Colon,
            Self::DoubleColon => TokenType::DoubleColon,
            Self::Semicolon => TokenType::Semicolon,
            Self::Comma => TokenType::Comma,
            Self::LeftBrace => TokenType::LeftBrace,
            Self::RightBrace => TokenType::RightBrace,
            Self::LeftBracket => TokenType::LeftBracket,
            Self::RightBracket => TokenType::RightBracket,
            Self::LeftParen => TokenType::LeftParen,
            Self::RightParen => TokenType::RightParen,
            Self::Greater => TokenType::Greater,
            Self::Plus => TokenType::Plus,
            Self::Tilde => TokenType::Tilde,
            Self::Pipe => TokenType::Pipe,
            Self::Slash => TokenType::Slash,
            Self::Bang => TokenType::Bang,
            Self::Dot => TokenType::Dot,
            Self::Star => TokenType::Star,
            Self::Equals => TokenType::Equals,
            Self::Includes => TokenType::Includes,
            Self::DashMatch => TokenType::DashMatch,
            Self::PrefixMatch => TokenType::PrefixMatch,
            Self::SuffixMatch => TokenType::SuffixMatch,
            Self::SubstringMatch => TokenType::SubstringMatch,
            Self::Eof => TokenType::Eof,
        }
    }

    /// Returns true if this is the EOF sentinel.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    /// The identifier text if this is an ident token.
    #[must_use]
    pub fn ident(&self) -> Option<&str> {
        match self {
            Self::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// The numeric value if this is a number or dimension token.
    #[must_use]
    pub const fn number_value(&self) -> Option<f32> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Dimension(d) => Some(d.value),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(v) => write!(f, "IDENTIFIER '{v}'"),
            Self::Function(v) => write!(f, "FUNCTION '{v}('"),
            Self::AtKeyword(v) => write!(f, "AT-KEYWORD '@{v}'"),
            Self::Hash(v) => write!(f, "HASH '#{v}'"),
            Self::QuotedString(v) => write!(f, "STRING \"{v}\""),
            Self::Url(v) => write!(f, "URL '{v}'"),
            Self::Number(v) => write!(f, "NUMBER {v}"),
            Self::Dimension(d) => write!(f, "DIMENSION {d}"),
            other => write!(f, "{}", other.token_type()),
        }
    }
}

/// Value-free token types, used in expectation assertions and error
/// messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TokenType {
    Ident,
    Function,
    AtKeyword,
    Hash,
    QuotedString,
    Url,
    Number,
    Dimension,
    Colon,
    DoubleColon,
    Semicolon,
    Comma,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Greater,
    Plus,
    Tilde,
    Pipe,
    Slash,
    Bang,
    Dot,
    Star,
    Equals,
    Includes,
    DashMatch,
    PrefixMatch,
    SuffixMatch,
    SubstringMatch,
    Eof,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ident => "IDENTIFIER",
            Self::Function => "FUNCTION",
            Self::AtKeyword => "AT-KEYWORD",
            Self::Hash => "HASH",
            Self::QuotedString => "STRING",
            Self::Url => "URL",
            Self::Number => "NUMBER",
            Self::Dimension => "DIMENSION",
            Self::Colon => "':'",
            Self::DoubleColon => "'::'",
            Self::Semicolon => "';'",
            Self::Comma => "','",
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Greater => "'>'",
            Self::Plus => "'+'",
            Self::Tilde => "'~'",
            Self::Pipe => "'|'",
            Self::Slash => "'/'",
            Self::Bang => "'!'",
            Self::Dot => "'.'",
            Self::Star => "'*'",
            Self::Equals => "'='",
            Self::Includes => "'~='",
            Self::DashMatch => "'|='",
            Self::PrefixMatch => "'^='",
            Self::SuffixMatch => "'$='",
            Self::SubstringMatch => "'*='",
            Self::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// A classified, positioned fragment of source text.
///
/// Immutable once produced. `offset`/`len` count characters in the
/// source the lexer was given (plus any base offset), so a declaration's
/// raw source substring re-lexes to lexemes equal to the originals.
#[derive(Debug, Clone)]
pub struct Lexeme {
    /// The token kind, carrying any parsed value.
    pub kind: TokenKind,
    /// Character offset of the start of the fragment in the source.
    pub offset: usize,
    /// Length of the consumed text in characters.
    pub len: usize,
    /// True if whitespace or a comment immediately preceded this lexeme.
    /// Disambiguates `a :hover` (descendant) from `a:hover` (pseudo).
    pub ws_before: bool,
}

impl Lexeme {
    /// Create a lexeme.
    #[must_use]
    pub const fn new(kind: TokenKind, offset: usize, len: usize, ws_before: bool) -> Self {
        Self {
            kind,
            offset,
            len,
            ws_before,
        }
    }

    /// The value-free token type.
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        self.kind.token_type()
    }

    /// Returns true if this is the EOF sentinel.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.kind.is_eof()
    }
}

// Equality ignores `ws_before`: two lexemes denote the same source
// fragment if kind, offset, and length agree.
impl PartialEq for Lexeme {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.offset == other.offset && self.len == other.len
    }
}

impl Eq for Lexeme {}

impl Hash for Lexeme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(&self.kind).hash(state);
        match &self.kind {
            TokenKind::Ident(v)
            | TokenKind::Function(v)
            | TokenKind::AtKeyword(v)
            | TokenKind::Hash(v)
            | TokenKind::QuotedString(v)
            | TokenKind::Url(v) => v.hash(state),
            TokenKind::Number(v) => v.to_bits().hash(state),
            TokenKind::Dimension(d) => {
                d.value.to_bits().hash(state);
                d.unit.hash(state);
            }
            _ => {}
        }
        self.offset.hash(state);
        self.len.hash(state);
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.offset)
    }
}
