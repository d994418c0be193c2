//! A CSS3-flavored stylesheet engine for styling node trees.
//!
//! The crate covers the full path from raw stylesheet text to resolved
//! per-node declarations:
//!
//! - Tokenization per [CSS Syntax Level 3](https://www.w3.org/TR/css-syntax-3/):
//!   a character-cursor lexer producing offset-carrying lexemes, with
//!   escape handling, `url()` bodies, and numeric/dimension lookahead.
//! - Recursive-descent stylesheet parsing: rule sets, `@import` splicing
//!   with cycle detection, `@namespace`, `@media` scopes, `@keyframes`,
//!   and `@font-face`, with non-fatal error recovery throughout.
//! - Selectors per [Selectors Level 3](https://www.w3.org/TR/selectors-3/):
//!   combinator trees, attribute and structural pseudo-class matching,
//!   `:nth-*(an+b)` arguments, and specificity.
//! - A value sublanguage: colors ([CSS Color Level 4](https://www.w3.org/TR/css-color-4/)),
//!   gradients, shadows, borders and edge/corner shorthand expansion,
//!   animation and transition shorthands.
//! - The cascade per [CSS Cascading and Inheritance Level 3](https://www.w3.org/TR/css-cascade-3/):
//!   origin weight, specificity, and source order, with `!important`
//!   overlay.
//!
//! Parsing is lossy-tolerant rather than validating: malformed input is
//! recorded as a diagnostic on the [`stylesheet::Stylesheet`] and skipped,
//! and the rest of the sheet still parses.

/// Matched-rule collection and declaration resolution.
pub mod cascade;
/// The stylesheet parser, its error type, and source loading.
pub mod parser;
/// The selector model, matching, and specificity.
pub mod selector;
/// The rule model a parse produces.
pub mod stylesheet;
/// The character-cursor lexer and its lexemes.
pub mod tokenizer;
/// Typed declaration values and the value-sublanguage parser.
pub mod values;

pub use cascade::{matching_rule_sets, resolve, style_context, MatchedRule, StyleContext};
pub use parser::{MemoryLoader, NoLoader, ParseError, SourceLoader, StylesheetParser};
pub use stylesheet::{Stylesheet, StylesheetOrigin};
