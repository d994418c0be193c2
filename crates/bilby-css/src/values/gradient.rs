//! Gradient paints.
//!
//! [CSS Images Level 3](https://www.w3.org/TR/css-images-3/)

use serde::Serialize;
use strum_macros::{Display, EnumString};

use super::color::ColorValue;

/// [§ 3.4.3 Mixing](https://www.w3.org/TR/compositing-1/#blending)
/// Blend mode applied when compositing a gradient over what is beneath
/// it. Parsed from the closed keyword table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum BlendMode {
    /// Source over, no mixing.
    #[default]
    Normal,
    /// "The source color is multiplied by the destination color."
    Multiply,
    /// "Multiplies the complements of the backdrop and source color
    /// values, then complements the result."
    Screen,
    /// "Multiplies or screens the colors, depending on the backdrop
    /// color value."
    Overlay,
    /// "Selects the darker of the backdrop and source colors."
    Darken,
    /// "Selects the lighter of the backdrop and source colors."
    Lighten,
    /// "Brightens the backdrop color to reflect the source color."
    ColorDodge,
    /// "Darkens the backdrop color to reflect the source color."
    ColorBurn,
    /// "Multiplies or screens the colors, depending on the source
    /// color value."
    HardLight,
    /// "Darkens or lightens the colors, depending on the source color
    /// value."
    SoftLight,
    /// "Subtracts the darker of the two constituent colors from the
    /// lighter color."
    Difference,
    /// "Similar to difference, but lower in contrast."
    Exclusion,
    /// Hue of the source with saturation and luminosity of the backdrop.
    Hue,
    /// Saturation of the source with hue and luminosity of the backdrop.
    Saturation,
    /// Hue and saturation of the source with luminosity of the backdrop.
    Color,
    /// Luminosity of the source with hue and saturation of the backdrop.
    Luminosity,
}

/// `left` or `right` in a `to <side-or-corner>` direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HorizontalSide {
    /// Toward the left edge.
    Left,
    /// Toward the right edge.
    Right,
}

/// `top` or `bottom` in a `to <side-or-corner>` direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VerticalSide {
    /// Toward the top edge.
    Top,
    /// Toward the bottom edge.
    Bottom,
}

/// [§ 3.1.1 linear-gradient()](https://www.w3.org/TR/css-images-3/#linear-gradients)
/// "`<linear-gradient-syntax> = [ <angle> | to <side-or-corner> ]?`"
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GradientDirection {
    /// An explicit angle as a [0,1) turn fraction, 0 pointing up and
    /// increasing clockwise.
    Angle(f32),
    /// `to <side-or-corner>`; at least one side is present.
    To {
        /// Optional horizontal component of the corner.
        horizontal: Option<HorizontalSide>,
        /// Optional vertical component of the corner.
        vertical: Option<VerticalSide>,
    },
}

/// A single color stop: a color plus an optional position along the
/// gradient line as a [0,1] fraction. Unpositioned stops are spaced by
/// the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    /// The stop color.
    pub color: ColorValue,
    /// Position along the gradient line, if given.
    pub offset: Option<f32>,
}

/// A linear gradient: optional direction plus ordered color stops.
///
/// When `direction` is `None` the consumer infers the axis (top-to-bottom
/// by convention).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearGradient {
    /// Gradient line direction, if specified.
    pub direction: Option<GradientDirection>,
    /// Ordered color stops.
    pub stops: Vec<GradientStop>,
    /// Blend mode applied when compositing, default [`BlendMode::Normal`].
    pub blend_mode: BlendMode,
}

/// [§ 3.2 radial-gradient()](https://www.w3.org/TR/css-images-3/#radial-gradients)
/// A radial gradient: ordered color stops from center outward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialGradient {
    /// Ordered color stops, center first.
    pub stops: Vec<GradientStop>,
    /// Blend mode applied when compositing, default [`BlendMode::Normal`].
    pub blend_mode: BlendMode,
}

/// A gradient of either flavor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Gradient {
    /// A linear gradient.
    Linear(LinearGradient),
    /// A radial gradient.
    Radial(RadialGradient),
}

impl Gradient {
    /// The gradient's color stops.
    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Self::Linear(g) => &g.stops,
            Self::Radial(g) => &g.stops,
        }
    }

    /// Replace the blend mode, returning the modified gradient.
    #[must_use]
    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        match &mut self {
            Self::Linear(g) => g.blend_mode = mode,
            Self::Radial(g) => g.blend_mode = mode,
        }
        self
    }
}

/// What a fill or stroke is painted with: a flat color or a gradient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Paint {
    /// A flat color.
    Color(ColorValue),
    /// A gradient.
    Gradient(Gradient),
}

impl Default for Paint {
    fn default() -> Self {
        Self::Color(ColorValue::BLACK)
    }
}
