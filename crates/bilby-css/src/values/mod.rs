//! Typed declaration values and the value-sublanguage parser.

mod animation;
mod border;
mod color;
mod dimension;
mod gradient;
mod parser;
mod shadow;

pub use animation::{
    AnimationDirection, AnimationFillMode, AnimationInfo, AnimationPlayState, IterationCount,
    TimingFunction, TransitionInfo,
};
pub use border::{
    expand_corners, expand_edges, BorderInfo, BorderRadii, BorderStyle, CornerRadius, Insets,
};
pub use color::ColorValue;
pub use dimension::{Dimension, Unit};
pub use gradient::{
    BlendMode, Gradient, GradientDirection, GradientStop, HorizontalSide, LinearGradient, Paint,
    RadialGradient, VerticalSide,
};
pub use parser::ValueParser;
pub use shadow::{Shadow, ShadowGroup};
