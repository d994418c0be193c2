//! Border and inset values.
//!
//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)

use serde::Serialize;
use strum_macros::{Display, EnumString};

use super::dimension::{Dimension, Unit};
use super::gradient::Paint;

/// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
/// "Value: none | hidden | dotted | dashed | solid | double | groove |
/// ridge | inset | outset"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BorderStyle {
    /// "No border. Color and width are ignored."
    #[default]
    None,
    /// "Same as none, except in terms of border conflict resolution for
    /// table elements."
    Hidden,
    /// "A series of round dots."
    Dotted,
    /// "A series of square-ended dashes."
    Dashed,
    /// "A single line segment."
    Solid,
    /// "Two parallel solid lines with a gap between them."
    Double,
    /// "Looks as if it were carved in the canvas."
    Groove,
    /// "Looks as if it were coming out of the canvas."
    Ridge,
    /// "Looks as if the content on the inside of the border is sunken
    /// into the canvas."
    Inset,
    /// "Looks as if the content on the inside of the border is coming
    /// out of the canvas."
    Outset,
}

/// [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
///
/// One edge's border: width, style, and paint, each individually
/// optional. The `border` shorthand accepts them in any order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BorderInfo {
    /// Border width, if specified.
    pub width: Option<Dimension>,
    /// Border style, if specified.
    pub style: Option<BorderStyle>,
    /// Border paint (color or gradient), if specified.
    pub paint: Option<Paint>,
}

impl BorderInfo {
    /// The width in its unit's value, defaulting to 0.
    #[must_use]
    pub fn width_value(&self) -> f32 {
        self.width.map_or(0.0, |d| d.value)
    }

    /// The style, defaulting to [`BorderStyle::None`].
    #[must_use]
    pub fn style_or_default(&self) -> BorderStyle {
        self.style.unwrap_or_default()
    }

    /// True if nothing would be drawn: zero width or style `none`/`hidden`.
    #[must_use]
    pub fn is_invisible(&self) -> bool {
        self.width_value() <= 0.0
            || matches!(self.style_or_default(), BorderStyle::None | BorderStyle::Hidden)
    }
}

/// A top/right/bottom/left quadruple produced by the shorthand
/// edge-expansion rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Insets {
    /// Top edge.
    pub top: Dimension,
    /// Right edge.
    pub right: Dimension,
    /// Bottom edge.
    pub bottom: Dimension,
    /// Left edge.
    pub left: Dimension,
}

impl Insets {
    /// All four edges set to the same value.
    #[must_use]
    pub const fn uniform(value: Dimension) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Zero on all edges.
    #[must_use]
    pub const fn zero() -> Self {
        Self::uniform(Dimension::new(0.0, Unit::Px))
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::zero()
    }
}

/// [§ 7.1 Shorthands](https://www.w3.org/TR/css-backgrounds-3/#the-border-shorthands)
/// "If there is only one component value, it applies to all sides. If
/// there are two values, the top and bottom are set to the first value
/// and the right and left are set to the second. If there are three
/// values, the top is set to the first value, the left and right are set
/// to the second, and the bottom is set to the third. If there are four
/// values, they apply to the top, right, bottom, and left, respectively."
#[must_use]
pub fn expand_edges<T: Copy>(values: &[T]) -> Option<(T, T, T, T)> {
    match values {
        [all] => Some((*all, *all, *all, *all)),
        [vertical, horizontal] => Some((*vertical, *horizontal, *vertical, *horizontal)),
        [top, horizontal, bottom] => Some((*top, *horizontal, *bottom, *horizontal)),
        [top, right, bottom, left] => Some((*top, *right, *bottom, *left)),
        _ => None,
    }
}

/// One corner's radius: x and y components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CornerRadius {
    /// Horizontal radius.
    pub x: Dimension,
    /// Vertical radius.
    pub y: Dimension,
}

impl CornerRadius {
    /// A circular corner with equal x and y radii.
    #[must_use]
    pub const fn circular(radius: Dimension) -> Self {
        Self { x: radius, y: radius }
    }
}

/// [§ 5.1 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
/// "The four values for each radius are given in the order top-left,
/// top-right, bottom-right, bottom-left. If bottom-left is omitted it is
/// the same as top-right. If bottom-right is omitted it is the same as
/// top-left. If top-right is omitted it is the same as top-left."
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BorderRadii {
    /// Top-left corner.
    pub top_left: CornerRadius,
    /// Top-right corner.
    pub top_right: CornerRadius,
    /// Bottom-right corner.
    pub bottom_right: CornerRadius,
    /// Bottom-left corner.
    pub bottom_left: CornerRadius,
}

impl BorderRadii {
    /// All four corners set to the same radius.
    #[must_use]
    pub const fn uniform(corner: CornerRadius) -> Self {
        Self {
            top_left: corner,
            top_right: corner,
            bottom_right: corner,
            bottom_left: corner,
        }
    }
}

impl Default for BorderRadii {
    fn default() -> Self {
        Self::uniform(CornerRadius::circular(Dimension::new(0.0, Unit::Px)))
    }
}

/// Corner expansion for `border-radius`: 1 value ⇒ all corners; 2 ⇒
/// (top-left/bottom-right, top-right/bottom-left); 3 ⇒ (top-left,
/// top-right/bottom-left, bottom-right); 4 ⇒ clockwise from top-left.
#[must_use]
pub fn expand_corners<T: Copy>(values: &[T]) -> Option<(T, T, T, T)> {
    match values {
        [all] => Some((*all, *all, *all, *all)),
        [a, b] => Some((*a, *b, *a, *b)),
        [a, b, c] => Some((*a, *b, *c, *b)),
        [a, b, c, d] => Some((*a, *b, *c, *d)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_expansion_table() {
        assert_eq!(expand_edges(&[1]), Some((1, 1, 1, 1)));
        assert_eq!(expand_edges(&[1, 2]), Some((1, 2, 1, 2)));
        assert_eq!(expand_edges(&[1, 2, 3]), Some((1, 2, 3, 2)));
        assert_eq!(expand_edges(&[1, 2, 3, 4]), Some((1, 2, 3, 4)));
        assert_eq!(expand_edges::<i32>(&[]), None);
        assert_eq!(expand_edges(&[1, 2, 3, 4, 5]), None);
    }

    #[test]
    fn corner_expansion_differs_from_edges() {
        // Three radii: bottom-left mirrors top-right, not left/right.
        assert_eq!(expand_corners(&[1, 2, 3]), Some((1, 2, 3, 2)));
        assert_eq!(expand_corners(&[1, 2]), Some((1, 2, 1, 2)));
    }

    #[test]
    fn invisible_borders() {
        assert!(BorderInfo::default().is_invisible());
        let solid = BorderInfo {
            width: Some(Dimension::new(1.0, Unit::Px)),
            style: Some(BorderStyle::Solid),
            paint: None,
        };
        assert!(!solid.is_invisible());
    }
}
