//! Declarations: a property name plus a deferred value.
//!
//! The stylesheet parser never interprets a declaration's value — it
//! stores the raw source substring and the collected lexemes, and the
//! typed accessors here run the [`ValueParser`] on demand. Unused
//! properties are never value-parsed.

use crate::parser::ParseError;
use crate::tokenizer::Lexeme;
use crate::values::{
    AnimationInfo, BorderInfo, BorderRadii, ColorValue, Dimension, Gradient, Insets, Paint,
    ShadowGroup, TimingFunction, TransitionInfo, ValueParser,
};

/// One `name: value` declaration inside a rule block.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, as written.
    pub name: String,
    /// The raw source substring of the value, for diagnostics and
    /// change-detection hashing.
    pub raw_value: String,
    /// Character offset of `raw_value` in its source, so re-lexing the
    /// substring reproduces the collected lexemes' positions.
    pub source_offset: usize,
    /// The file the declaration came from, if known.
    pub file: Option<String>,
    /// Whether the value carried an `!important` annotation.
    pub important: bool,
    /// The collected value lexemes, excluding the `!important` tail.
    pub lexemes: Vec<Lexeme>,
}

impl Declaration {
    /// A parser over this declaration's value lexemes.
    #[must_use]
    pub fn value_parser(&self) -> ValueParser<'_> {
        ValueParser::new(&self.lexemes)
    }

    /// The value as a single color.
    pub fn as_color(&self) -> Result<ColorValue, ParseError> {
        self.value_parser().parse_color()
    }

    /// The value as a paint: a flat color or a gradient.
    pub fn as_paint(&self) -> Result<Paint, ParseError> {
        self.value_parser().parse_paint()
    }

    /// The value as a gradient.
    pub fn as_gradient(&self) -> Result<Gradient, ParseError> {
        self.value_parser().parse_gradient()
    }

    /// The value as a comma-separated shadow group.
    pub fn as_shadow_group(&self) -> Result<ShadowGroup, ParseError> {
        self.value_parser().parse_shadow_group()
    }

    /// The value as a `border` shorthand.
    pub fn as_border(&self) -> Result<BorderInfo, ParseError> {
        self.value_parser().parse_border()
    }

    /// The value as `border-radius` corner radii.
    pub fn as_border_radii(&self) -> Result<BorderRadii, ParseError> {
        self.value_parser().parse_border_radii()
    }

    /// The value as 1-4 edge-expanded insets.
    pub fn as_insets(&self) -> Result<Insets, ParseError> {
        self.value_parser().parse_insets()
    }

    /// The value as a list of sizes.
    pub fn as_size_list(&self) -> Result<Vec<Dimension>, ParseError> {
        self.value_parser().parse_size_list()
    }

    /// The value as a single number.
    pub fn as_number(&self) -> Result<f32, ParseError> {
        self.value_parser().parse_number()
    }

    /// The value as a list of numbers.
    pub fn as_float_list(&self) -> Result<Vec<f32>, ParseError> {
        self.value_parser().parse_float_list()
    }

    /// The value as an angle, normalized to a [0,1) turn fraction.
    pub fn as_angle(&self) -> Result<f32, ParseError> {
        self.value_parser().parse_angle()
    }

    /// The value as a time in seconds.
    pub fn as_seconds(&self) -> Result<f32, ParseError> {
        self.value_parser().parse_seconds()
    }

    /// The value as a URL.
    pub fn as_url(&self) -> Result<String, ParseError> {
        self.value_parser().parse_url()
    }

    /// The value as a comma-separated font list.
    pub fn as_font_names(&self) -> Result<Vec<String>, ParseError> {
        self.value_parser().parse_font_names()
    }

    /// The value as an `animation` shorthand list.
    pub fn as_animation_info_list(&self) -> Result<Vec<AnimationInfo>, ParseError> {
        self.value_parser().parse_animation_info_list()
    }

    /// The value as a `transition` shorthand list.
    pub fn as_transition_info_list(&self) -> Result<Vec<TransitionInfo>, ParseError> {
        self.value_parser().parse_transition_info_list()
    }

    /// The value as a list of timing-function keywords.
    pub fn as_timing_function_list(&self) -> Result<Vec<TimingFunction>, ParseError> {
        self.value_parser().parse_timing_function_list()
    }
}
