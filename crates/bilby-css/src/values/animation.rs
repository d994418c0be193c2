//! Animation and transition metadata.
//!
//! [CSS Animations Level 1](https://www.w3.org/TR/css-animations-1/) and
//! [CSS Transitions](https://www.w3.org/TR/css-transitions-1/)
//!
//! Only the *metadata* is modeled here — playback belongs to the
//! consumer. Every field is an `Option` so cascaded resolution can
//! distinguish "not specified" from "specified as the initial value":
//! [`AnimationInfo::set_undefined_properties`] fills only `None` fields.

use serde::Serialize;
use strum_macros::{Display, EnumString};

use super::dimension::Dimension;

/// [§ 18.2 'animation-timing-function'](https://www.w3.org/TR/css-easing-1/)
/// The closed set of easing keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum TimingFunction {
    /// "Equal to cubic-bezier(0.25, 0.1, 0.25, 1)."
    Ease,
    /// "Equal to cubic-bezier(0, 0, 1, 1)."
    Linear,
    /// "Equal to cubic-bezier(0.42, 0, 1, 1)."
    EaseIn,
    /// "Equal to cubic-bezier(0, 0, 0.58, 1)."
    EaseOut,
    /// "Equal to cubic-bezier(0.42, 0, 0.58, 1)."
    EaseInOut,
    /// "Equal to steps(1, jump-start)."
    StepStart,
    /// "Equal to steps(1, jump-end)."
    StepEnd,
}

/// [§ 4.4 'animation-direction'](https://www.w3.org/TR/css-animations-1/#animation-direction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AnimationDirection {
    /// "All iterations of the animation are played as specified."
    Normal,
    /// "All iterations of the animation are played in the reverse
    /// direction."
    Reverse,
    /// "The animation cycle iterations that are odd counts are played in
    /// the normal direction."
    Alternate,
    /// "The animation cycle iterations that are odd counts are played in
    /// the reverse direction."
    AlternateReverse,
}

/// [§ 4.6 'animation-play-state'](https://www.w3.org/TR/css-animations-1/#animation-play-state)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AnimationPlayState {
    /// "While this property is set to running, the animation proceeds."
    Running,
    /// "While it is set to paused, the animation is paused."
    Paused,
}

/// [§ 4.7 'animation-fill-mode'](https://www.w3.org/TR/css-animations-1/#animation-fill-mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum AnimationFillMode {
    /// "The animation has no effect when it is applied but not executing."
    None,
    /// "After the animation is over, the animation will apply the
    /// property values for the time the animation ended."
    Forwards,
    /// "During the period defined by animation-delay, the animation will
    /// apply the property values defined in the keyframe that will start
    /// the first iteration."
    Backwards,
    /// "Both forwards and backwards fill will apply."
    Both,
}

/// [§ 4.5 'animation-iteration-count'](https://www.w3.org/TR/css-animations-1/#animation-iteration-count)
/// "Value: infinite | <number>"
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum IterationCount {
    /// "The animation will repeat forever."
    Infinite,
    /// A finite (possibly fractional) count.
    Count(f32),
}

/// One item of an `animation` shorthand list. Fields are recognized by
/// token type or keyword membership, so they may appear in any order;
/// unspecified fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnimationInfo {
    /// The `@keyframes` name this animation plays.
    pub name: Option<String>,
    /// Time the animation takes for one cycle.
    pub duration: Option<Dimension>,
    /// Easing applied within each cycle.
    pub timing_function: Option<TimingFunction>,
    /// How many cycles are played.
    pub iteration_count: Option<IterationCount>,
    /// Whether alternate cycles reverse.
    pub direction: Option<AnimationDirection>,
    /// Whether the animation is running or paused.
    pub play_state: Option<AnimationPlayState>,
    /// Offset before the animation starts.
    pub delay: Option<Dimension>,
    /// How property values apply outside the active duration.
    pub fill_mode: Option<AnimationFillMode>,
}

impl AnimationInfo {
    /// Fill every unspecified (`None`) field from `other`, leaving
    /// specified fields untouched. Used when resolving a cascaded value
    /// against an inherited or default one.
    pub fn set_undefined_properties(&mut self, other: &Self) {
        if self.name.is_none() {
            self.name.clone_from(&other.name);
        }
        if self.duration.is_none() {
            self.duration = other.duration;
        }
        if self.timing_function.is_none() {
            self.timing_function = other.timing_function;
        }
        if self.iteration_count.is_none() {
            self.iteration_count = other.iteration_count;
        }
        if self.direction.is_none() {
            self.direction = other.direction;
        }
        if self.play_state.is_none() {
            self.play_state = other.play_state;
        }
        if self.delay.is_none() {
            self.delay = other.delay;
        }
        if self.fill_mode.is_none() {
            self.fill_mode = other.fill_mode;
        }
    }
}

/// One item of a `transition` shorthand list. Same any-order field
/// recognition and `None`-means-unspecified convention as
/// [`AnimationInfo`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransitionInfo {
    /// The property this transition animates, `all` included literally.
    pub property: Option<String>,
    /// Time the transition takes.
    pub duration: Option<Dimension>,
    /// Easing applied across the transition.
    pub timing_function: Option<TimingFunction>,
    /// Offset before the transition starts.
    pub delay: Option<Dimension>,
}

impl TransitionInfo {
    /// Fill every unspecified (`None`) field from `other`.
    pub fn set_undefined_properties(&mut self, other: &Self) {
        if self.property.is_none() {
            self.property.clone_from(&other.property);
        }
        if self.duration.is_none() {
            self.duration = other.duration;
        }
        if self.timing_function.is_none() {
            self.timing_function = other.timing_function;
        }
        if self.delay.is_none() {
            self.delay = other.delay;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Unit;

    #[test]
    fn undefined_fields_are_filled_specified_ones_kept() {
        let mut info = AnimationInfo {
            duration: Some(Dimension::new(2.0, Unit::S)),
            ..AnimationInfo::default()
        };
        let defaults = AnimationInfo {
            duration: Some(Dimension::new(0.0, Unit::S)),
            direction: Some(AnimationDirection::Normal),
            ..AnimationInfo::default()
        };
        info.set_undefined_properties(&defaults);
        // Specified duration survives; unspecified direction is filled.
        assert_eq!(info.duration, Some(Dimension::new(2.0, Unit::S)));
        assert_eq!(info.direction, Some(AnimationDirection::Normal));
        assert_eq!(info.play_state, None);
    }

    #[test]
    fn keyword_enums_parse_kebab_case() {
        assert_eq!(
            "ease-in-out".parse::<TimingFunction>().ok(),
            Some(TimingFunction::EaseInOut)
        );
        assert_eq!(
            "alternate-reverse".parse::<AnimationDirection>().ok(),
            Some(AnimationDirection::AlternateReverse)
        );
    }
}
