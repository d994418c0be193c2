//! Shadow values.
//!
//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/#box-shadow)

use serde::Serialize;

use super::color::ColorValue;

/// [§ 6.1 'box-shadow'](https://www.w3.org/TR/css-backgrounds-3/#box-shadow)
///
/// "The 'box-shadow' property attaches one or more drop-shadows to the box."
///
/// `<shadow> = inset? && <length>{2,4} && <color>?`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shadow {
    /// If true, the shadow is drawn inside the box.
    pub inset: bool,
    /// Horizontal offset. Positive = right.
    pub offset_x: f32,
    /// Vertical offset. Positive = down.
    pub offset_y: f32,
    /// Blur radius, >= 0. Default 0.
    pub blur: f32,
    /// Spread distance. Default 0.
    pub spread: f32,
    /// Shadow color, default black.
    pub color: ColorValue,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            inset: false,
            offset_x: 0.0,
            offset_y: 0.0,
            blur: 0.0,
            spread: 0.0,
            color: ColorValue::BLACK,
        }
    }
}

/// An ordered group of shadows from a comma-separated list.
///
/// The first listed shadow paints on top; order must be preserved for
/// compositing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShadowGroup {
    /// The shadows, first-on-top.
    pub shadows: Vec<Shadow>,
}

impl ShadowGroup {
    /// A group holding the given shadows.
    #[must_use]
    pub const fn new(shadows: Vec<Shadow>) -> Self {
        Self { shadows }
    }
}
