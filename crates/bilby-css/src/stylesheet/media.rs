//! Media expressions.
//!
//! [Media Queries](https://www.w3.org/TR/css3-mediaqueries/)
//!
//! An `@media` prelude parses into a [`MediaExpression`] that scopes the
//! rule sets inside the block. Evaluation happens at match time against a
//! caller-supplied [`MediaContext`] describing the device.

use std::collections::HashMap;

use crate::values::Dimension;

/// A media feature value.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaValue {
    /// A keyword such as `portrait`.
    Ident(String),
    /// A bare number such as a device scale.
    Number(f32),
    /// A dimension such as `320px`.
    Dimension(Dimension),
    /// A ratio such as `16/9`.
    Ratio(f32, f32),
}

impl MediaValue {
    /// The value as a number, for `min-`/`max-` range comparisons.
    /// Ratios flatten to their quotient; keywords have no number.
    #[must_use]
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Ident(_) => None,
            Self::Number(n) => Some(*n),
            Self::Dimension(d) => Some(d.value),
            Self::Ratio(w, h) => Some(w / h),
        }
    }
}

/// A parsed media query: a single feature test, or an AND-combination.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaExpression {
    /// `(name)` or `(name: value)`.
    Feature {
        /// The feature name, `min-`/`max-` prefix included.
        name: String,
        /// The tested value; `None` is a bare presence test.
        value: Option<MediaValue>,
    },
    /// `(...) and (...)`: all sub-expressions must match.
    And(Vec<MediaExpression>),
}

impl MediaExpression {
    /// Evaluate this expression against a device context. `min-` and
    /// `max-` prefixed features compare numerically; unprefixed features
    /// compare for equality, and a valueless feature is a presence test.
    #[must_use]
    pub fn matches(&self, context: &MediaContext) -> bool {
        match self {
            Self::And(expressions) => expressions.iter().all(|e| e.matches(context)),
            Self::Feature { name, value } => {
                if let Some(base) = name.strip_prefix("min-") {
                    return Self::compare(context, base, value.as_ref(), |have, want| have >= want);
                }
                if let Some(base) = name.strip_prefix("max-") {
                    return Self::compare(context, base, value.as_ref(), |have, want| have <= want);
                }
                let Some(actual) = context.get(name) else {
                    return false;
                };
                match value {
                    None => true,
                    Some(MediaValue::Ident(want)) => match actual {
                        MediaValue::Ident(have) => have.eq_ignore_ascii_case(want),
                        _ => false,
                    },
                    Some(want) => match (actual.as_number(), want.as_number()) {
                        (Some(have), Some(want)) => (have - want).abs() < f32::EPSILON,
                        _ => false,
                    },
                }
            }
        }
    }

    fn compare(
        context: &MediaContext,
        feature: &str,
        value: Option<&MediaValue>,
        ordered: impl Fn(f32, f32) -> bool,
    ) -> bool {
        let (Some(actual), Some(expected)) = (context.get(feature), value) else {
            return false;
        };
        match (actual.as_number(), expected.as_number()) {
            (Some(have), Some(want)) => ordered(have, want),
            _ => false,
        }
    }
}

/// The device features media expressions are evaluated against.
#[derive(Debug, Clone, Default)]
pub struct MediaContext {
    features: HashMap<String, MediaValue>,
}

impl MediaContext {
    /// An empty context: every feature test fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: set a feature value.
    #[must_use]
    pub fn with_feature(mut self, name: impl Into<String>, value: MediaValue) -> Self {
        let _ = self.features.insert(name.into(), value);
        self
    }

    /// Look up a feature by its unprefixed name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MediaValue> {
        self.features.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Unit;

    fn phone() -> MediaContext {
        MediaContext::new()
            .with_feature("width", MediaValue::Dimension(Dimension::new(320.0, Unit::Px)))
            .with_feature("orientation", MediaValue::Ident("portrait".into()))
    }

    #[test]
    fn min_max_compare_numerically() {
        let min300 = MediaExpression::Feature {
            name: "min-width".into(),
            value: Some(MediaValue::Dimension(Dimension::new(300.0, Unit::Px))),
        };
        let max300 = MediaExpression::Feature {
            name: "max-width".into(),
            value: Some(MediaValue::Dimension(Dimension::new(300.0, Unit::Px))),
        };
        assert!(min300.matches(&phone()));
        assert!(!max300.matches(&phone()));
    }

    #[test]
    fn and_requires_all() {
        let both = MediaExpression::And(vec![
            MediaExpression::Feature {
                name: "orientation".into(),
                value: Some(MediaValue::Ident("portrait".into())),
            },
            MediaExpression::Feature {
                name: "min-width".into(),
                value: Some(MediaValue::Number(400.0)),
            },
        ]);
        assert!(!both.matches(&phone()));
    }
}
