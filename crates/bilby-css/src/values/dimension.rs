//! Numeric quantities with units.
//!
//! A [`Dimension`] is a number plus a unit category. Its unit is fixed at
//! creation; conversions produce new values, never mutate in place.

use core::fmt;

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// Unit suffix of a dimension token.
///
/// Covers lengths (including the density-independent `dp`/`sp` pixels of
/// mobile styling), angles, times, frequencies, percentages, and the
/// font-relative `em`/`ex` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Unit {
    /// Pixels.
    Px,
    /// Points (1/72 inch).
    Pt,
    /// Centimeters.
    Cm,
    /// Millimeters.
    Mm,
    /// Inches.
    In,
    /// Picas (12 points).
    Pc,
    /// Density-independent pixels.
    Dp,
    /// Scale-independent pixels.
    Sp,
    /// Font-size-relative unit.
    Em,
    /// x-height-relative unit.
    Ex,
    /// Percentage.
    #[strum(serialize = "%")]
    Percent,
    /// Degrees.
    Deg,
    /// Radians.
    Rad,
    /// Gradians (400 per full turn).
    Grad,
    /// Turns (1 per full revolution).
    Turn,
    /// Milliseconds.
    Ms,
    /// Seconds.
    S,
    /// Hertz.
    Hz,
    /// Kilohertz.
    Khz,
}

impl Unit {
    /// Returns true for absolute and font-relative length units.
    #[must_use]
    pub const fn is_length(self) -> bool {
        matches!(
            self,
            Self::Px
                | Self::Pt
                | Self::Cm
                | Self::Mm
                | Self::In
                | Self::Pc
                | Self::Dp
                | Self::Sp
                | Self::Em
                | Self::Ex
        )
    }

    /// Returns true for angle units.
    #[must_use]
    pub const fn is_angle(self) -> bool {
        matches!(self, Self::Deg | Self::Rad | Self::Grad | Self::Turn)
    }

    /// Returns true for time units.
    #[must_use]
    pub const fn is_time(self) -> bool {
        matches!(self, Self::Ms | Self::S)
    }

    /// Returns true for frequency units.
    #[must_use]
    pub const fn is_frequency(self) -> bool {
        matches!(self, Self::Hz | Self::Khz)
    }

    /// Returns true for the percentage unit.
    #[must_use]
    pub const fn is_percentage(self) -> bool {
        matches!(self, Self::Percent)
    }
}

/// A number plus a unit.
///
/// The unit is fixed at creation. Conversion methods return new values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimension {
    /// The numeric value as written.
    pub value: f32,
    /// The unit suffix.
    pub unit: Unit,
}

impl Dimension {
    /// Create a dimension.
    #[must_use]
    pub const fn new(value: f32, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Convert an angle dimension to degrees. Non-angle units are
    /// returned unchanged.
    #[must_use]
    pub fn to_degrees(self) -> Self {
        let value = match self.unit {
            Unit::Deg => self.value,
            Unit::Rad => self.value.to_degrees(),
            Unit::Grad => self.value * 0.9,
            Unit::Turn => self.value * 360.0,
            _ => return self,
        };
        Self::new(value, Unit::Deg)
    }

    /// Convert an angle dimension to radians. Non-angle units are
    /// returned unchanged.
    #[must_use]
    pub fn to_radians(self) -> Self {
        let value = match self.unit {
            Unit::Deg => self.value.to_radians(),
            Unit::Rad => self.value,
            Unit::Grad => (self.value * 0.9).to_radians(),
            Unit::Turn => self.value * core::f32::consts::TAU,
            _ => return self,
        };
        Self::new(value, Unit::Rad)
    }

    /// Convert a time dimension to seconds. Non-time units are returned
    /// unchanged.
    #[must_use]
    pub fn to_seconds(self) -> Self {
        match self.unit {
            Unit::Ms => Self::new(self.value / 1000.0, Unit::S),
            Unit::S => self,
            _ => self,
        }
    }

    /// Convert a time dimension to milliseconds. Non-time units are
    /// returned unchanged.
    #[must_use]
    pub fn to_milliseconds(self) -> Self {
        match self.unit {
            Unit::S => Self::new(self.value * 1000.0, Unit::Ms),
            Unit::Ms => self,
            _ => self,
        }
    }

    /// A percentage as a [0,1] fraction; any other unit yields the raw
    /// value.
    #[must_use]
    pub fn as_fraction(self) -> f32 {
        if self.unit.is_percentage() {
            self.value / 100.0
        } else {
            self.value
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_conversions_produce_new_values() {
        let half_turn = Dimension::new(0.5, Unit::Turn);
        assert!((half_turn.to_degrees().value - 180.0).abs() < 1e-4);
        assert!((half_turn.to_radians().value - core::f32::consts::PI).abs() < 1e-4);
        // Original is untouched.
        assert_eq!(half_turn.unit, Unit::Turn);
    }

    #[test]
    fn time_conversions() {
        assert!((Dimension::new(250.0, Unit::Ms).to_seconds().value - 0.25).abs() < 1e-6);
        assert!((Dimension::new(2.0, Unit::S).to_milliseconds().value - 2000.0).abs() < 1e-6);
    }

    #[test]
    fn percent_fraction() {
        assert!((Dimension::new(50.0, Unit::Percent).as_fraction() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn unit_parses_from_suffix() {
        assert_eq!("px".parse::<Unit>().ok(), Some(Unit::Px));
        assert_eq!("deg".parse::<Unit>().ok(), Some(Unit::Deg));
        assert!("parsec".parse::<Unit>().is_err());
    }
}
