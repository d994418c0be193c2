//! Lexing: source text to a stream of positioned lexemes.

mod token;
#[allow(clippy::module_inception)]
mod tokenizer;

pub use token::{Lexeme, TokenKind, TokenType};
pub use tokenizer::Lexer;
