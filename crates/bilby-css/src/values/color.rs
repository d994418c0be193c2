//! Color values.
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use serde::Serialize;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0 };

    /// An opaque color from byte channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color from byte channels including alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color from [0,1] channel fractions.
    #[must_use]
    pub fn from_fractions(r: f32, g: f32, b: f32) -> Self {
        Self::rgb(channel_byte(r), channel_byte(g), channel_byte(b))
    }

    /// This color with its alpha replaced by a [0,1] fraction.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: channel_byte(alpha),
            ..self
        }
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value
    /// consists of 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let double = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            // "The three-digit RGB notation (#RGB) is converted into
            // six-digit form (#RRGGBB) by replicating digits."
            3 => Some(Self::rgb(double(0)?, double(1)?, double(2)?)),
            4 => Some(Self::rgba(double(0)?, double(1)?, double(2)?, double(3)?)),
            6 => Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let (r, g, b) = match name.to_ascii_lowercase().as_str() {
            "transparent" => return Some(Self::TRANSPARENT),
            "black" => (0, 0, 0),
            "silver" => (192, 192, 192),
            "gray" | "grey" => (128, 128, 128),
            "white" => (255, 255, 255),
            "maroon" => (128, 0, 0),
            "red" => (255, 0, 0),
            "purple" => (128, 0, 128),
            "fuchsia" | "magenta" => (255, 0, 255),
            "green" => (0, 128, 0),
            "lime" => (0, 255, 0),
            "olive" => (128, 128, 0),
            "yellow" => (255, 255, 0),
            "navy" => (0, 0, 128),
            "blue" => (0, 0, 255),
            "teal" => (0, 128, 128),
            "aqua" | "cyan" => (0, 255, 255),
            "orange" => (255, 165, 0),
            "brown" => (165, 42, 42),
            "coral" => (255, 127, 80),
            "crimson" => (220, 20, 60),
            "darkblue" => (0, 0, 139),
            "darkgray" | "darkgrey" => (169, 169, 169),
            "darkgreen" => (0, 100, 0),
            "darkorange" => (255, 140, 0),
            "darkred" => (139, 0, 0),
            "gold" => (255, 215, 0),
            "hotpink" => (255, 105, 180),
            "indigo" => (75, 0, 130),
            "ivory" => (255, 255, 240),
            "khaki" => (240, 230, 140),
            "lavender" => (230, 230, 250),
            "lightblue" => (173, 216, 230),
            "lightgray" | "lightgrey" => (211, 211, 211),
            "lightgreen" => (144, 238, 144),
            "lightyellow" => (255, 255, 224),
            "pink" => (255, 192, 203),
            "plum" => (221, 160, 221),
            "salmon" => (250, 128, 114),
            "skyblue" => (135, 206, 235),
            "slategray" | "slategrey" => (112, 128, 144),
            "tan" => (210, 180, 140),
            "tomato" => (255, 99, 71),
            "turquoise" => (64, 224, 208),
            "violet" => (238, 130, 238),
            "wheat" => (245, 222, 179),
            _ => return None,
        };
        Some(Self::rgb(r, g, b))
    }

    /// [§ 7 HSL Colors](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
    /// "HSL colors are specified as a hue angle, and percentages for
    /// saturation and lightness." Hue is a [0,1) turn fraction here;
    /// saturation and lightness are [0,1] fractions.
    #[must_use]
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(1.0) * 360.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let (r1, g1, b1) = hue_sector(h, c);
        let m = l - c / 2.0;
        Self::from_fractions(r1 + m, g1 + m, b1 + m)
    }

    /// HSB (HSV) to sRGB. Hue is a [0,1) turn fraction; saturation and
    /// brightness are [0,1] fractions.
    #[must_use]
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let h = hue.rem_euclid(1.0) * 360.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = brightness.clamp(0.0, 1.0);

        let c = v * s;
        let (r1, g1, b1) = hue_sector(h, c);
        let m = v - c;
        Self::from_fractions(r1 + m, g1 + m, b1 + m)
    }
}

impl Default for ColorValue {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Chroma distributed over the six 60° hue sectors, before the lightness
/// offset is added.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hue_sector(hue_degrees: f32, chroma: f32) -> (f32, f32, f32) {
    let h = hue_degrees / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_byte(fraction: f32) -> u8 {
    (fraction.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hex_replicates_digits() {
        assert_eq!(ColorValue::from_hex("f00"), Some(ColorValue::rgb(255, 0, 0)));
        assert_eq!(
            ColorValue::from_hex("#1234"),
            Some(ColorValue::rgba(0x11, 0x22, 0x33, 0x44))
        );
    }

    #[test]
    fn named_lookup_is_case_insensitive() {
        assert_eq!(ColorValue::from_named("RED"), Some(ColorValue::rgb(255, 0, 0)));
        assert_eq!(ColorValue::from_named("no-such-color"), None);
    }

    #[test]
    fn hsl_primaries() {
        // hsl(0, 100%, 50%) is pure red; 1/3 turn is pure green.
        assert_eq!(ColorValue::from_hsl(0.0, 1.0, 0.5), ColorValue::rgb(255, 0, 0));
        assert_eq!(
            ColorValue::from_hsl(1.0 / 3.0, 1.0, 0.5),
            ColorValue::rgb(0, 255, 0)
        );
    }

    #[test]
    fn hsb_full_brightness() {
        // hsb(0, 0%, 100%) is white; hsb(0, 100%, 100%) is red.
        assert_eq!(ColorValue::from_hsb(0.0, 0.0, 1.0), ColorValue::WHITE);
        assert_eq!(ColorValue::from_hsb(0.0, 1.0, 1.0), ColorValue::rgb(255, 0, 0));
    }
}
