//! The rule model a parse produces.
//!
//! A [`Stylesheet`] is an ordered sequence of [`RuleSet`]s plus namespace
//! declarations, keyframe definitions, font faces, and accumulated parse
//! diagnostics. It is mutated only during parsing; afterward it is
//! read-only and safe to share across threads for matching.

mod declaration;
mod media;

pub use declaration::Declaration;
pub use media::{MediaContext, MediaExpression, MediaValue};

use std::collections::HashMap;
use std::sync::Arc;

use crate::parser::ParseError;
use crate::selector::Selector;

/// Where a stylesheet came from, in ascending cascade weight: user-agent
/// defaults lose to application styles, which lose to user styles, which
/// lose to inline declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StylesheetOrigin {
    /// Built-in defaults.
    UserAgent,
    /// Styles shipped with the application.
    Application,
    /// User-supplied overrides.
    User,
    /// Inline declarations on an element.
    Inline,
}

impl StylesheetOrigin {
    /// Numeric cascade weight; higher wins between equal-specificity
    /// rules from different stylesheets.
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::UserAgent => 0,
            Self::Application => 1,
            Self::User => 2,
            Self::Inline => 3,
        }
    }
}

/// One selector paired with its declaration block.
///
/// A comma-separated selector group expands into one `RuleSet` per
/// selector, sharing the declaration list, so matching and specificity
/// never deal with groups.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// The (post-expansion) selector.
    pub selector: Selector,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
    /// The `@media` scope the rule was parsed under, if any.
    pub media_scope: Option<Arc<MediaExpression>>,
    /// Ordinal position within the stylesheet, the cascade's final
    /// tie-break.
    pub position: usize,
}

/// One block of a `@keyframes` rule.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeBlock {
    /// Position along the animation in [0,1]: `from` = 0, `to` = 1, or an
    /// explicit percentage.
    pub offset: f32,
    /// The block's declarations.
    pub declarations: Vec<Declaration>,
}

/// A named `@keyframes` animation definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    /// The animation name referenced by `animation` declarations.
    pub name: String,
    /// Blocks in source order. A comma-grouped offset list (`0%, 50%
    /// { ... }`) expands to one block per offset sharing the
    /// declarations.
    pub blocks: Vec<KeyframeBlock>,
}

/// An `@font-face` rule: a bag of declarations describing one face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontFace {
    /// The rule's declarations.
    pub declarations: Vec<Declaration>,
}

impl FontFace {
    /// The declared `font-family` name, if present and parseable.
    #[must_use]
    pub fn family(&self) -> Option<String> {
        self.declaration("font-family")
            .and_then(|d| d.as_font_names().ok())
            .and_then(|mut names| if names.is_empty() { None } else { Some(names.remove(0)) })
    }

    /// The declared `src` URL, if present and parseable.
    #[must_use]
    pub fn src(&self) -> Option<String> {
        self.declaration("src").and_then(|d| d.as_url().ok())
    }

    fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }
}

/// A parsed stylesheet.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// The stylesheet's cascade origin.
    pub origin: StylesheetOrigin,
    /// Rule sets in source order (imports spliced in place).
    pub rule_sets: Vec<RuleSet>,
    /// `@namespace prefix url(...)` declarations.
    pub namespaces: HashMap<String, String>,
    /// The prefixless `@namespace url(...)` declaration, if any.
    pub default_namespace: Option<String>,
    /// `@keyframes` definitions in source order.
    pub keyframes: Vec<Keyframes>,
    /// `@font-face` rules in source order.
    pub font_faces: Vec<FontFace>,
    /// Accumulated parse diagnostics; parsing never aborts on one.
    pub errors: Vec<String>,
    /// The file the stylesheet was parsed from, if known.
    pub file: Option<String>,
}

impl Stylesheet {
    /// An empty stylesheet with the given origin.
    #[must_use]
    pub fn new(origin: StylesheetOrigin) -> Self {
        Self {
            origin,
            rule_sets: Vec::new(),
            namespaces: HashMap::new(),
            default_namespace: None,
            keyframes: Vec::new(),
            font_faces: Vec::new(),
            errors: Vec::new(),
            file: None,
        }
    }

    /// Record a parse error as a formatted diagnostic, attributed to
    /// `file` (the file being parsed at the time, which may be an
    /// import rather than this stylesheet's own file).
    pub fn record_error(&mut self, error: &ParseError, file: Option<&str>) {
        self.errors.push(error.diagnostic(file));
    }

    /// Resolve a namespace prefix to its URI.
    #[must_use]
    pub fn namespace_uri(&self, prefix: &str) -> Option<&str> {
        self.namespaces.get(prefix).map(String::as_str)
    }

    /// Find a keyframes definition by name.
    #[must_use]
    pub fn keyframes_named(&self, name: &str) -> Option<&Keyframes> {
        self.keyframes.iter().find(|k| k.name == name)
    }
}
