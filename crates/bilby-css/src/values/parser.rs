//! The declaration-value parser.
//!
//! Each public `parse_*` method interprets one value grammar over the
//! bounded lexeme list a declaration collected. The cursor resets to 0 on
//! every public call, so one `ValueParser` serves one declaration's value;
//! concurrent calls need their own instance.
//!
//! Failure semantics: every method returns `Result`, with messages naming
//! the expected token set and what was found. Callers record the message
//! and substitute a default — a bad value never aborts anything upstream.

use std::str::FromStr;

use crate::parser::{ErrorOffset, ParseError};
use crate::tokenizer::{Lexeme, TokenKind};

use super::animation::{
    AnimationDirection, AnimationFillMode, AnimationInfo, AnimationPlayState, IterationCount,
    TimingFunction, TransitionInfo,
};
use super::border::{
    expand_corners, expand_edges, BorderInfo, BorderRadii, BorderStyle, CornerRadius, Insets,
};
use super::color::ColorValue;
use super::dimension::{Dimension, Unit};
use super::gradient::{
    BlendMode, Gradient, GradientDirection, GradientStop, HorizontalSide, LinearGradient, Paint,
    RadialGradient, VerticalSide,
};
use super::shadow::{Shadow, ShadowGroup};

/// Cursor over one declaration's collected value lexemes.
#[derive(Debug)]
pub struct ValueParser<'a> {
    lexemes: &'a [Lexeme],
    position: usize,
}

impl<'a> ValueParser<'a> {
    /// A parser over the given value lexemes, cursor at the start.
    #[must_use]
    pub const fn new(lexemes: &'a [Lexeme]) -> Self {
        Self {
            lexemes,
            position: 0,
        }
    }

    /// Parse a single color: functional (`rgb`, `rgba`, `hsl`, `hsla`,
    /// `hsb`, `hsba`), hex literal, or named identifier.
    pub fn parse_color(&mut self) -> Result<ColorValue, ParseError> {
        self.position = 0;
        self.color_value()
    }

    /// Parse a paint: a gradient if the value starts with a gradient
    /// function, otherwise a flat color.
    pub fn parse_paint(&mut self) -> Result<Paint, ParseError> {
        self.position = 0;
        self.paint_value()
    }

    /// Parse a `linear-gradient(...)` or `radial-gradient(...)`, with an
    /// optional trailing blend-mode identifier after the closing paren.
    pub fn parse_gradient(&mut self) -> Result<Gradient, ParseError> {
        self.position = 0;
        self.gradient_value()
    }

    /// Parse one shadow: optional leading `inset`, required x/y offsets,
    /// optional blur and spread, optional trailing color (default black).
    pub fn parse_shadow(&mut self) -> Result<Shadow, ParseError> {
        self.position = 0;
        self.shadow_value()
    }

    /// Parse a comma-separated shadow list into a group, first-on-top.
    pub fn parse_shadow_group(&mut self) -> Result<ShadowGroup, ParseError> {
        self.position = 0;
        let mut shadows = vec![self.shadow_value()?];
        while self.take_comma() {
            shadows.push(self.shadow_value()?);
        }
        Ok(ShadowGroup::new(shadows))
    }

    /// Parse a `border` shorthand: at most one each of width, style, and
    /// paint, recognized by token type in any order.
    pub fn parse_border(&mut self) -> Result<BorderInfo, ParseError> {
        self.position = 0;
        let mut border = BorderInfo::default();
        while let Some(lexeme) = self.current() {
            match &lexeme.kind {
                TokenKind::Number(_) | TokenKind::Dimension(_) if border.width.is_none() => {
                    border.width = Some(self.size_value()?);
                }
                TokenKind::Ident(name) if BorderStyle::from_str(name).is_ok() => {
                    if border.style.is_some() {
                        return Err(self.unexpected("at most one border style"));
                    }
                    // from_str re-checked above
                    border.style = BorderStyle::from_str(name).ok();
                    self.advance();
                }
                _ if border.paint.is_none() => {
                    border.paint = Some(self.paint_value()?);
                }
                _ => return Err(self.unexpected("border width, style, or paint")),
            }
        }
        Ok(border)
    }

    /// Parse `border-radius`: 1-4 corner radii, optionally followed by
    /// `/` and 1-4 vertical radii.
    pub fn parse_border_radii(&mut self) -> Result<BorderRadii, ParseError> {
        self.position = 0;
        let horizontal = self.size_run()?;
        let vertical = if self.take_kind(&TokenKind::Slash) {
            self.size_run()?
        } else {
            horizontal.clone()
        };

        let (xa, xb, xc, xd) = expand_corners(&horizontal)
            .ok_or_else(|| self.count_error("1 to 4 corner radii", horizontal.len()))?;
        let (ya, yb, yc, yd) = expand_corners(&vertical)
            .ok_or_else(|| self.count_error("1 to 4 corner radii", vertical.len()))?;

        Ok(BorderRadii {
            top_left: CornerRadius { x: xa, y: ya },
            top_right: CornerRadius { x: xb, y: yb },
            bottom_right: CornerRadius { x: xc, y: yc },
            bottom_left: CornerRadius { x: xd, y: yd },
        })
    }

    /// Parse 1-4 sizes and expand them to a top/right/bottom/left
    /// quadruple per the shorthand edge-expansion rule.
    pub fn parse_insets(&mut self) -> Result<Insets, ParseError> {
        self.position = 0;
        let sizes = self.size_run()?;
        let (top, right, bottom, left) =
            expand_edges(&sizes).ok_or_else(|| self.count_error("1 to 4 sizes", sizes.len()))?;
        Ok(Insets {
            top,
            right,
            bottom,
            left,
        })
    }

    /// Parse a list of sizes, commas optional between entries.
    pub fn parse_size_list(&mut self) -> Result<Vec<Dimension>, ParseError> {
        self.position = 0;
        self.size_run()
    }

    /// Parse a single number.
    pub fn parse_number(&mut self) -> Result<f32, ParseError> {
        self.position = 0;
        self.number_value()
    }

    /// Parse a list of numbers, commas optional between entries.
    pub fn parse_float_list(&mut self) -> Result<Vec<f32>, ParseError> {
        self.position = 0;
        let mut values = vec![self.number_value()?];
        while !self.at_end() {
            let _ = self.take_comma();
            values.push(self.number_value()?);
        }
        Ok(values)
    }

    /// Parse an angle, normalized to a [0,1) turn fraction. A bare number
    /// is taken as degrees.
    pub fn parse_angle(&mut self) -> Result<f32, ParseError> {
        self.position = 0;
        self.angle_value()
    }

    /// Parse a time, in seconds. A bare number is taken as seconds.
    pub fn parse_seconds(&mut self) -> Result<f32, ParseError> {
        self.position = 0;
        self.seconds_value()
    }

    /// Parse a URL: a `url(...)` token, a `url("...")` function form, or
    /// a bare quoted string.
    pub fn parse_url(&mut self) -> Result<String, ParseError> {
        self.position = 0;
        match self.current().map(|l| l.kind.clone()) {
            Some(TokenKind::Url(value)) => {
                self.advance();
                Ok(value)
            }
            Some(TokenKind::Function(name)) if name.eq_ignore_ascii_case("url") => {
                self.advance();
                let value = match self.current().map(|l| l.kind.clone()) {
                    Some(TokenKind::QuotedString(s)) => {
                        self.advance();
                        s
                    }
                    _ => return Err(self.unexpected("STRING inside url()")),
                };
                self.expect_kind(&TokenKind::RightParen, "')'")?;
                Ok(value)
            }
            Some(TokenKind::QuotedString(value)) => {
                self.advance();
                Ok(value)
            }
            _ => Err(self.unexpected("URL or STRING")),
        }
    }

    /// Parse a comma-separated font list. Unquoted multi-identifier names
    /// are joined with single spaces.
    pub fn parse_font_names(&mut self) -> Result<Vec<String>, ParseError> {
        self.position = 0;
        let mut names = vec![self.font_name()?];
        while self.take_comma() {
            names.push(self.font_name()?);
        }
        Ok(names)
    }

    /// Parse a comma-separated `animation` shorthand list. Within one
    /// item, fields are recognized by token type or keyword membership
    /// and may appear in any order.
    pub fn parse_animation_info_list(&mut self) -> Result<Vec<AnimationInfo>, ParseError> {
        self.position = 0;
        let mut items = vec![self.animation_item()?];
        while self.take_comma() {
            items.push(self.animation_item()?);
        }
        Ok(items)
    }

    /// Parse a comma-separated `transition` shorthand list.
    pub fn parse_transition_info_list(&mut self) -> Result<Vec<TransitionInfo>, ParseError> {
        self.position = 0;
        let mut items = vec![self.transition_item()?];
        while self.take_comma() {
            items.push(self.transition_item()?);
        }
        Ok(items)
    }

    /// Parse a comma-separated list of timing-function keywords.
    pub fn parse_timing_function_list(&mut self) -> Result<Vec<TimingFunction>, ParseError> {
        self.position = 0;
        let mut items = vec![self.timing_function_value()?];
        while self.take_comma() {
            items.push(self.timing_function_value()?);
        }
        Ok(items)
    }

    // ── value grammars (cursor-relative, no reset) ──────────────────────

    fn paint_value(&mut self) -> Result<Paint, ParseError> {
        match self.current().map(Lexeme::token_type) {
            Some(_) if self.at_gradient_function() => Ok(Paint::Gradient(self.gradient_value()?)),
            Some(_) => Ok(Paint::Color(self.color_value()?)),
            None => Err(self.unexpected("COLOR or gradient")),
        }
    }

    fn at_gradient_function(&self) -> bool {
        matches!(
            self.current().map(|l| &l.kind),
            Some(TokenKind::Function(name))
                if name.eq_ignore_ascii_case("linear-gradient")
                    || name.eq_ignore_ascii_case("radial-gradient")
        )
    }

    fn gradient_value(&mut self) -> Result<Gradient, ParseError> {
        let name = match self.current().map(|l| l.kind.clone()) {
            Some(TokenKind::Function(name)) => name,
            _ => return Err(self.unexpected("FUNCTION 'linear-gradient(' or 'radial-gradient('")),
        };
        self.advance();

        let gradient = if name.eq_ignore_ascii_case("linear-gradient") {
            let direction = self.gradient_direction()?;
            let stops = self.gradient_stops()?;
            Gradient::Linear(LinearGradient {
                direction,
                stops,
                blend_mode: BlendMode::Normal,
            })
        } else if name.eq_ignore_ascii_case("radial-gradient") {
            let stops = self.gradient_stops()?;
            Gradient::Radial(RadialGradient {
                stops,
                blend_mode: BlendMode::Normal,
            })
        } else {
            return Err(self.unexpected("FUNCTION 'linear-gradient(' or 'radial-gradient('"));
        };
        self.expect_kind(&TokenKind::RightParen, "')'")?;

        // Optional blend-mode identifier after the closing paren.
        if let Some(TokenKind::Ident(keyword)) = self.current().map(|l| &l.kind) {
            if let Ok(mode) = BlendMode::from_str(keyword) {
                self.advance();
                return Ok(gradient.with_blend_mode(mode));
            }
        }
        Ok(gradient)
    }

    /// Optional leading `<angle> ,` or `to <side-or-corner> ,` of a
    /// linear gradient.
    fn gradient_direction(&mut self) -> Result<Option<GradientDirection>, ParseError> {
        match self.current().map(|l| l.kind.clone()) {
            Some(TokenKind::Number(_) | TokenKind::Dimension(_)) => {
                // A leading number is only a direction if a comma follows;
                // otherwise it belongs to the first stop's offset grammar.
                let mark = self.position;
                let angle = self.angle_value()?;
                if self.take_comma() {
                    Ok(Some(GradientDirection::Angle(angle)))
                } else {
                    self.position = mark;
                    Ok(None)
                }
            }
            Some(TokenKind::Ident(word)) if word.eq_ignore_ascii_case("to") => {
                self.advance();
                let mut horizontal = None;
                let mut vertical = None;
                while let Some(TokenKind::Ident(side)) = self.current().map(|l| l.kind.clone()) {
                    if horizontal.is_none() {
                        if let Ok(h) = HorizontalSide::from_str(&side) {
                            horizontal = Some(h);
                            self.advance();
                            continue;
                        }
                    }
                    if vertical.is_none() {
                        if let Ok(v) = VerticalSide::from_str(&side) {
                            vertical = Some(v);
                            self.advance();
                            continue;
                        }
                    }
                    break;
                }
                if horizontal.is_none() && vertical.is_none() {
                    return Err(self.unexpected("side keyword after 'to'"));
                }
                let _ = self.take_comma();
                Ok(Some(GradientDirection::To {
                    horizontal,
                    vertical,
                }))
            }
            _ => Ok(None),
        }
    }

    /// Comma-separated `(color, optional offset)` stops up to the closing
    /// paren.
    fn gradient_stops(&mut self) -> Result<Vec<GradientStop>, ParseError> {
        let mut stops = Vec::new();
        loop {
            let color = self.color_value()?;
            let offset = match self.current().map(|l| &l.kind) {
                Some(TokenKind::Dimension(d)) if d.unit.is_percentage() => {
                    let fraction = d.as_fraction();
                    self.advance();
                    Some(fraction)
                }
                _ => None,
            };
            stops.push(GradientStop { color, offset });
            if !self.take_comma() {
                return Ok(stops);
            }
        }
    }

    fn color_value(&mut self) -> Result<ColorValue, ParseError> {
        match self.current().map(|l| l.kind.clone()) {
            Some(TokenKind::Hash(hex)) => {
                let color = ColorValue::from_hex(&hex)
                    .ok_or_else(|| self.invalid(format!("invalid hex color '#{hex}'")))?;
                self.advance();
                Ok(color)
            }
            Some(TokenKind::Ident(name)) => {
                let color = ColorValue::from_named(&name)
                    .ok_or_else(|| self.invalid(format!("unknown color name '{name}'")))?;
                self.advance();
                Ok(color)
            }
            Some(TokenKind::Function(name)) => self.functional_color(&name),
            _ => Err(self.unexpected("HASH, IDENTIFIER, or color FUNCTION")),
        }
    }

    fn functional_color(&mut self, name: &str) -> Result<ColorValue, ParseError> {
        self.advance(); // past the function token
        let color = match name.to_ascii_lowercase().as_str() {
            "rgb" => {
                let (r, g, b) = self.rgb_channels()?;
                ColorValue::from_fractions(r, g, b)
            }
            "rgba" => {
                // Convenience form: rgba(#fff, 0.5) or rgba(red, 0.5)
                // re-alphas an existing color.
                let base = match self.current().map(|l| &l.kind) {
                    Some(TokenKind::Hash(_) | TokenKind::Ident(_)) => {
                        let color = self.color_value()?;
                        let _ = self.take_comma();
                        Some(color)
                    }
                    _ => None,
                };
                let color = match base {
                    Some(color) => color,
                    None => {
                        let (r, g, b) = self.rgb_channels()?;
                        ColorValue::from_fractions(r, g, b)
                    }
                };
                color.with_alpha(self.alpha_channel()?)
            }
            "hsl" => {
                let (h, s, l) = self.hue_triplet()?;
                ColorValue::from_hsl(h, s, l)
            }
            "hsla" => {
                let (h, s, l) = self.hue_triplet()?;
                ColorValue::from_hsl(h, s, l).with_alpha(self.alpha_channel()?)
            }
            "hsb" => {
                let (h, s, b) = self.hue_triplet()?;
                ColorValue::from_hsb(h, s, b)
            }
            "hsba" => {
                let (h, s, b) = self.hue_triplet()?;
                ColorValue::from_hsb(h, s, b).with_alpha(self.alpha_channel()?)
            }
            _ => return Err(self.unexpected("color FUNCTION")),
        };
        self.expect_kind(&TokenKind::RightParen, "')'")?;
        Ok(color)
    }

    fn rgb_channels(&mut self) -> Result<(f32, f32, f32), ParseError> {
        Ok((
            self.byte_channel()?,
            self.byte_channel()?,
            self.byte_channel()?,
        ))
    }

    fn hue_triplet(&mut self) -> Result<(f32, f32, f32), ParseError> {
        Ok((
            self.hue_channel()?,
            self.fraction_channel()?,
            self.fraction_channel()?,
        ))
    }

    /// A color channel: 0-255 number mapped to [0,1] by /255, or a
    /// percentage mapped by /100. Advances past an optional trailing
    /// comma, supporting both legacy comma and modern space syntax.
    fn byte_channel(&mut self) -> Result<f32, ParseError> {
        let value = match self.current().map(|l| &l.kind) {
            Some(TokenKind::Number(n)) => n / 255.0,
            Some(TokenKind::Dimension(d)) if d.unit.is_percentage() => d.as_fraction(),
            _ => return Err(self.unexpected("NUMBER or percentage channel")),
        };
        self.advance();
        let _ = self.take_comma();
        Ok(value.clamp(0.0, 1.0))
    }

    /// An alpha channel: a [0,1] number or a percentage.
    fn alpha_channel(&mut self) -> Result<f32, ParseError> {
        let value = match self.current().map(|l| &l.kind) {
            Some(TokenKind::Number(n)) => *n,
            Some(TokenKind::Dimension(d)) if d.unit.is_percentage() => d.as_fraction(),
            _ => return Err(self.unexpected("NUMBER or percentage alpha")),
        };
        self.advance();
        let _ = self.take_comma();
        Ok(value.clamp(0.0, 1.0))
    }

    /// A hue: degrees (bare number or angle dimension) normalized to a
    /// [0,1) turn fraction.
    fn hue_channel(&mut self) -> Result<f32, ParseError> {
        let value = self.angle_value()?;
        let _ = self.take_comma();
        Ok(value)
    }

    /// A saturation/lightness/brightness channel: percentage, or a bare
    /// [0,1] number.
    fn fraction_channel(&mut self) -> Result<f32, ParseError> {
        let value = match self.current().map(|l| &l.kind) {
            Some(TokenKind::Number(n)) => *n,
            Some(TokenKind::Dimension(d)) if d.unit.is_percentage() => d.as_fraction(),
            _ => return Err(self.unexpected("NUMBER or percentage channel")),
        };
        self.advance();
        let _ = self.take_comma();
        Ok(value.clamp(0.0, 1.0))
    }

    fn shadow_value(&mut self) -> Result<Shadow, ParseError> {
        let mut shadow = Shadow::default();

        if let Some(TokenKind::Ident(word)) = self.current().map(|l| &l.kind) {
            if word.eq_ignore_ascii_case("inset") {
                shadow.inset = true;
                self.advance();
            }
        }

        shadow.offset_x = self.length_value()?;
        shadow.offset_y = self.length_value()?;
        if self.at_length() {
            shadow.blur = self.length_value()?.max(0.0);
        }
        if self.at_length() {
            shadow.spread = self.length_value()?;
        }
        if self.at_color() {
            shadow.color = self.color_value()?;
        }
        Ok(shadow)
    }

    fn at_length(&self) -> bool {
        matches!(
            self.current().map(|l| &l.kind),
            Some(TokenKind::Number(_)) | Some(TokenKind::Dimension(_))
        )
    }

    fn at_color(&self) -> bool {
        match self.current().map(|l| &l.kind) {
            Some(TokenKind::Hash(_) | TokenKind::Function(_)) => true,
            Some(TokenKind::Ident(name)) => ColorValue::from_named(name).is_some(),
            _ => false,
        }
    }

    fn animation_item(&mut self) -> Result<AnimationInfo, ParseError> {
        let mut info = AnimationInfo::default();
        while let Some(lexeme) = self.current() {
            match &lexeme.kind {
                TokenKind::Comma => break,
                TokenKind::Dimension(d) if d.unit.is_time() => {
                    // First time is the duration, second the delay.
                    let seconds = *d;
                    if info.duration.is_none() {
                        info.duration = Some(seconds);
                    } else if info.delay.is_none() {
                        info.delay = Some(seconds);
                    } else {
                        return Err(self.unexpected("at most two time values"));
                    }
                    self.advance();
                }
                TokenKind::Number(n) if info.iteration_count.is_none() => {
                    info.iteration_count = Some(IterationCount::Count(*n));
                    self.advance();
                }
                TokenKind::Ident(word) => {
                    self.apply_animation_keyword(&mut info, &word.clone())?;
                }
                _ => return Err(self.unexpected("animation field")),
            }
        }
        Ok(info)
    }

    /// Classify one identifier of an animation item by keyword
    /// membership, falling back to the animation name.
    fn apply_animation_keyword(
        &mut self,
        info: &mut AnimationInfo,
        word: &str,
    ) -> Result<(), ParseError> {
        if word.eq_ignore_ascii_case("infinite") && info.iteration_count.is_none() {
            info.iteration_count = Some(IterationCount::Infinite);
        } else if let (Ok(timing), None) = (TimingFunction::from_str(word), info.timing_function) {
            info.timing_function = Some(timing);
        } else if let (Ok(direction), None) = (AnimationDirection::from_str(word), info.direction) {
            info.direction = Some(direction);
        } else if let (Ok(state), None) = (AnimationPlayState::from_str(word), info.play_state) {
            info.play_state = Some(state);
        } else if let (Ok(fill), None) = (AnimationFillMode::from_str(word), info.fill_mode) {
            info.fill_mode = Some(fill);
        } else if info.name.is_none() {
            info.name = Some(word.to_owned());
        } else {
            return Err(self.unexpected("animation field"));
        }
        self.advance();
        Ok(())
    }

    fn transition_item(&mut self) -> Result<TransitionInfo, ParseError> {
        let mut info = TransitionInfo::default();
        while let Some(lexeme) = self.current() {
            match &lexeme.kind {
                TokenKind::Comma => break,
                TokenKind::Dimension(d) if d.unit.is_time() => {
                    let time = *d;
                    if info.duration.is_none() {
                        info.duration = Some(time);
                    } else if info.delay.is_none() {
                        info.delay = Some(time);
                    } else {
                        return Err(self.unexpected("at most two time values"));
                    }
                    self.advance();
                }
                TokenKind::Ident(word) => {
                    if let (Ok(timing), None) =
                        (TimingFunction::from_str(word), info.timing_function)
                    {
                        info.timing_function = Some(timing);
                    } else if info.property.is_none() {
                        info.property = Some(word.clone());
                    } else {
                        return Err(self.unexpected("transition field"));
                    }
                    self.advance();
                }
                _ => return Err(self.unexpected("transition field")),
            }
        }
        Ok(info)
    }

    fn timing_function_value(&mut self) -> Result<TimingFunction, ParseError> {
        match self.current().map(|l| &l.kind) {
            Some(TokenKind::Ident(word)) => {
                let timing = TimingFunction::from_str(word)
                    .map_err(|_| self.unexpected("timing-function keyword"))?;
                self.advance();
                Ok(timing)
            }
            _ => Err(self.unexpected("timing-function keyword")),
        }
    }

    fn font_name(&mut self) -> Result<String, ParseError> {
        match self.current().map(|l| l.kind.clone()) {
            Some(TokenKind::QuotedString(name)) => {
                self.advance();
                Ok(name)
            }
            Some(TokenKind::Ident(first)) => {
                self.advance();
                let mut name = first;
                // Unquoted family names may span several identifiers.
                while let Some(TokenKind::Ident(word)) = self.current().map(|l| l.kind.clone()) {
                    name.push(' ');
                    name.push_str(&word);
                    self.advance();
                }
                Ok(name)
            }
            _ => Err(self.unexpected("IDENTIFIER or STRING font name")),
        }
    }

    /// A run of sizes up to a comma boundary behavior: commas optional.
    fn size_run(&mut self) -> Result<Vec<Dimension>, ParseError> {
        let mut sizes = vec![self.size_value()?];
        while self.at_length() || self.at_kind(&TokenKind::Comma) {
            let _ = self.take_comma();
            if self.at_end() {
                break;
            }
            sizes.push(self.size_value()?);
        }
        Ok(sizes)
    }

    /// A size: a dimension, or a bare number taken as pixels.
    fn size_value(&mut self) -> Result<Dimension, ParseError> {
        let size = match self.current().map(|l| &l.kind) {
            Some(TokenKind::Number(n)) => Dimension::new(*n, Unit::Px),
            Some(TokenKind::Dimension(d)) => *d,
            _ => return Err(self.unexpected("NUMBER or DIMENSION")),
        };
        self.advance();
        Ok(size)
    }

    /// A raw length magnitude, unit discarded.
    fn length_value(&mut self) -> Result<f32, ParseError> {
        Ok(self.size_value()?.value)
    }

    fn number_value(&mut self) -> Result<f32, ParseError> {
        match self.current().map(|l| &l.kind) {
            Some(TokenKind::Number(n)) => {
                let n = *n;
                self.advance();
                Ok(n)
            }
            _ => Err(self.unexpected("NUMBER")),
        }
    }

    /// An angle normalized to a [0,1) turn fraction; bare numbers are
    /// degrees.
    fn angle_value(&mut self) -> Result<f32, ParseError> {
        let degrees = match self.current().map(|l| &l.kind) {
            Some(TokenKind::Number(n)) => *n,
            Some(TokenKind::Dimension(d)) if d.unit.is_angle() => d.to_degrees().value,
            _ => return Err(self.unexpected("NUMBER or angle DIMENSION")),
        };
        self.advance();
        Ok((degrees / 360.0).rem_euclid(1.0))
    }

    /// A time in seconds; bare numbers are seconds.
    fn seconds_value(&mut self) -> Result<f32, ParseError> {
        let seconds = match self.current().map(|l| &l.kind) {
            Some(TokenKind::Number(n)) => *n,
            Some(TokenKind::Dimension(d)) if d.unit.is_time() => d.to_seconds().value,
            _ => return Err(self.unexpected("NUMBER or time DIMENSION")),
        };
        self.advance();
        Ok(seconds)
    }

    // ── cursor primitives ───────────────────────────────────────────────

    fn current(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.position)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn at_end(&self) -> bool {
        self.position >= self.lexemes.len()
    }

    fn at_kind(&self, kind: &TokenKind) -> bool {
        self.current().is_some_and(|l| l.kind == *kind)
    }

    /// Consume a comma if one is next; returns whether it was there.
    fn take_comma(&mut self) -> bool {
        self.take_kind(&TokenKind::Comma)
    }

    fn take_kind(&mut self, kind: &TokenKind) -> bool {
        if self.at_kind(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_kind(&mut self, kind: &TokenKind, expected: &str) -> Result<(), ParseError> {
        if self.take_kind(kind) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn error_offset(&self) -> ErrorOffset {
        self.current()
            .map_or(ErrorOffset::Eof, |l| ErrorOffset::At(l.offset))
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let found = self
            .current()
            .map_or_else(|| "end of value".to_owned(), |l| l.kind.to_string());
        ParseError::Unexpected {
            expected: expected.to_owned(),
            found,
            offset: self.error_offset(),
        }
    }

    fn invalid(&self, message: String) -> ParseError {
        ParseError::invalid(message, self.error_offset())
    }

    fn count_error(&self, expected: &str, got: usize) -> ParseError {
        self.invalid(format!("expected {expected}, got {got}"))
    }
}
