//! Integration tests for the declaration-value parser.

use bilby_css::parser::{NoLoader, StylesheetParser};
use bilby_css::stylesheet::{Declaration, StylesheetOrigin};
use bilby_css::values::{
    BorderStyle, ColorValue, Dimension, Gradient, GradientDirection, HorizontalSide,
    IterationCount, Paint, TimingFunction, Unit,
};

/// Helper to parse one declaration out of a synthetic rule
fn declaration(property: &str, value: &str) -> Declaration {
    let sheet = StylesheetParser::new(NoLoader).parse(
        &format!("* {{ {property}: {value}; }}"),
        StylesheetOrigin::Application,
    );
    assert!(sheet.errors.is_empty(), "{value}: {:?}", sheet.errors);
    sheet.rule_sets[0].declarations[0].clone()
}

#[test]
fn test_color_notations_agree() {
    let named = declaration("color", "red").as_color().unwrap();
    let long_hex = declaration("color", "#ff0000").as_color().unwrap();
    let short_hex = declaration("color", "#f00").as_color().unwrap();
    let functional = declaration("color", "rgb(255, 0, 0)").as_color().unwrap();
    assert_eq!(named, ColorValue::rgb(255, 0, 0));
    assert_eq!(named, long_hex);
    assert_eq!(named, short_hex);
    assert_eq!(named, functional);
}

#[test]
fn test_rgba_alpha_channel() {
    let color = declaration("color", "rgba(255, 0, 0, 0.5)").as_color().unwrap();
    assert_eq!(color, ColorValue::rgba(255, 0, 0, 128));
    // Percentage channels work too.
    let percent = declaration("color", "rgba(100%, 0%, 0%, 50%)").as_color().unwrap();
    assert_eq!(percent, ColorValue::rgba(255, 0, 0, 128));
}

#[test]
fn test_rgba_convenience_base_color() {
    // rgba(<color>, a) re-alphas an existing color.
    let hex = declaration("color", "rgba(#00ff00, 0.25)").as_color().unwrap();
    assert_eq!(hex, ColorValue::rgba(0, 255, 0, 64));
    let named = declaration("color", "rgba(black, 0.5)").as_color().unwrap();
    assert_eq!(named, ColorValue::rgba(0, 0, 0, 128));
}

#[test]
fn test_hsl() {
    let green = declaration("color", "hsl(120, 100%, 50%)").as_color().unwrap();
    assert_eq!(green, ColorValue::rgb(0, 255, 0));
}

#[test]
fn test_bad_color_reports_name() {
    let error = declaration("color", "vermillion-ish").as_color().unwrap_err();
    assert!(error.to_string().contains("vermillion-ish"), "{error}");
}

#[test]
fn test_insets_edge_expansion() {
    let insets = declaration("margin", "1px 2px 3px").as_insets().unwrap();
    assert_eq!(insets.top, Dimension::new(1.0, Unit::Px));
    assert_eq!(insets.right, Dimension::new(2.0, Unit::Px));
    assert_eq!(insets.bottom, Dimension::new(3.0, Unit::Px));
    // Left mirrors right when only three values are given.
    assert_eq!(insets.left, Dimension::new(2.0, Unit::Px));

    let uniform = declaration("padding", "8px").as_insets().unwrap();
    assert_eq!(uniform.top, uniform.left);
    assert_eq!(uniform.right, uniform.bottom);
}

#[test]
fn test_bare_numbers_are_pixels() {
    let insets = declaration("margin", "4 8").as_insets().unwrap();
    assert_eq!(insets.top, Dimension::new(4.0, Unit::Px));
    assert_eq!(insets.right, Dimension::new(8.0, Unit::Px));
}

#[test]
fn test_border_fields_in_any_order() {
    let forward = declaration("border", "1px solid red").as_border().unwrap();
    let shuffled = declaration("border", "red solid 1px").as_border().unwrap();
    assert_eq!(forward, shuffled);
    assert_eq!(forward.width, Some(Dimension::new(1.0, Unit::Px)));
    assert_eq!(forward.style, Some(BorderStyle::Solid));
    assert_eq!(forward.paint, Some(Paint::Color(ColorValue::rgb(255, 0, 0))));
}

#[test]
fn test_partial_border() {
    let style_only = declaration("border", "dashed").as_border().unwrap();
    assert_eq!(style_only.style, Some(BorderStyle::Dashed));
    assert!(style_only.width.is_none());
    assert!(style_only.is_invisible());
}

#[test]
fn test_border_radii_with_slash() {
    let radii = declaration("border-radius", "10px 20px / 5px")
        .as_border_radii()
        .unwrap();
    assert_eq!(radii.top_left.x, Dimension::new(10.0, Unit::Px));
    assert_eq!(radii.top_right.x, Dimension::new(20.0, Unit::Px));
    assert_eq!(radii.top_left.y, Dimension::new(5.0, Unit::Px));
    assert_eq!(radii.bottom_right.y, Dimension::new(5.0, Unit::Px));
}

#[test]
fn test_corner_expansion_mirrors_diagonally() {
    // Three radii: bottom-left takes the top-right value.
    let radii = declaration("border-radius", "1px 2px 3px")
        .as_border_radii()
        .unwrap();
    assert_eq!(radii.bottom_left.x, radii.top_right.x);
    assert_eq!(radii.bottom_right.x, Dimension::new(3.0, Unit::Px));
}

#[test]
fn test_shadow_group_preserves_order() {
    let group = declaration("box-shadow", "1px 2px 3px black, inset 0 0 red")
        .as_shadow_group()
        .unwrap();
    assert_eq!(group.shadows.len(), 2);
    // The first listed shadow paints on top.
    let top = &group.shadows[0];
    assert_eq!((top.offset_x, top.offset_y, top.blur), (1.0, 2.0, 3.0));
    assert!(!top.inset);
    let inner = &group.shadows[1];
    assert!(inner.inset);
    assert_eq!(inner.color, ColorValue::rgb(255, 0, 0));
}

#[test]
fn test_linear_gradient() {
    let paint = declaration("background", "linear-gradient(to right, red, blue 80%)")
        .as_paint()
        .unwrap();
    let Paint::Gradient(Gradient::Linear(gradient)) = paint else {
        panic!("expected a linear gradient");
    };
    assert_eq!(
        gradient.direction,
        Some(GradientDirection::To {
            horizontal: Some(HorizontalSide::Right),
            vertical: None,
        })
    );
    assert_eq!(gradient.stops.len(), 2);
    assert_eq!(gradient.stops[0].offset, None);
    assert_eq!(gradient.stops[1].offset, Some(0.8));
}

#[test]
fn test_gradient_angle_needs_following_comma() {
    // A leading angle is only a direction when a comma follows.
    let gradient = declaration("background", "linear-gradient(90deg, red, blue)")
        .as_gradient()
        .unwrap();
    let Gradient::Linear(linear) = gradient else {
        panic!("expected a linear gradient");
    };
    assert_eq!(linear.direction, Some(GradientDirection::Angle(0.25)));
}

#[test]
fn test_radial_gradient() {
    let gradient = declaration("background", "radial-gradient(white, black)")
        .as_gradient()
        .unwrap();
    assert!(matches!(gradient, Gradient::Radial(_)));
    assert_eq!(gradient.stops().len(), 2);
}

#[test]
fn test_animation_shorthand() {
    let items = declaration("animation", "fade 2s ease-in infinite")
        .as_animation_info_list()
        .unwrap();
    assert_eq!(items.len(), 1);
    let info = &items[0];
    assert_eq!(info.name.as_deref(), Some("fade"));
    assert_eq!(info.duration, Some(Dimension::new(2.0, Unit::S)));
    assert_eq!(info.timing_function, Some(TimingFunction::EaseIn));
    assert!(matches!(info.iteration_count, Some(IterationCount::Infinite)));
    assert_eq!(info.delay, None);
}

#[test]
fn test_animation_two_times_are_duration_then_delay() {
    let items = declaration("animation", "slide 1s 250ms")
        .as_animation_info_list()
        .unwrap();
    assert_eq!(items[0].duration, Some(Dimension::new(1.0, Unit::S)));
    assert_eq!(items[0].delay, Some(Dimension::new(250.0, Unit::Ms)));
}

#[test]
fn test_transition_list() {
    let items = declaration("transition", "opacity 0.3s, transform 1s ease-out")
        .as_transition_info_list()
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].property.as_deref(), Some("opacity"));
    assert_eq!(items[1].property.as_deref(), Some("transform"));
    assert_eq!(items[1].timing_function, Some(TimingFunction::EaseOut));
}

#[test]
fn test_timing_function_list() {
    let list = declaration("animation-timing-function", "ease, step-end")
        .as_timing_function_list()
        .unwrap();
    assert_eq!(list, vec![TimingFunction::Ease, TimingFunction::StepEnd]);
}

#[test]
fn test_angle_normalizes_to_turn_fraction() {
    assert!((declaration("a", "450deg").as_angle().unwrap() - 0.25).abs() < 1e-6);
    assert!((declaration("a", "0.5turn").as_angle().unwrap() - 0.5).abs() < 1e-6);
    // Bare numbers are degrees.
    assert!((declaration("a", "180").as_angle().unwrap() - 0.5).abs() < 1e-6);
}

#[test]
fn test_seconds() {
    assert!((declaration("d", "250ms").as_seconds().unwrap() - 0.25).abs() < 1e-6);
    assert!((declaration("d", "2s").as_seconds().unwrap() - 2.0).abs() < 1e-6);
}

#[test]
fn test_url_forms() {
    assert_eq!(declaration("src", "url(a.png)").as_url().unwrap(), "a.png");
    assert_eq!(declaration("src", "url(\"b.png\")").as_url().unwrap(), "b.png");
    assert_eq!(declaration("src", "\"c.png\"").as_url().unwrap(), "c.png");
}

#[test]
fn test_font_names_join_and_split() {
    let names = declaration("font-family", "Helvetica Neue, \"Fira Sans\", serif")
        .as_font_names()
        .unwrap();
    assert_eq!(names, vec!["Helvetica Neue", "Fira Sans", "serif"]);
}

#[test]
fn test_numbers_and_lists() {
    assert!((declaration("opacity", "0.5").as_number().unwrap() - 0.5).abs() < 1e-6);
    assert_eq!(
        declaration("weights", "1 2, 3").as_float_list().unwrap(),
        vec![1.0, 2.0, 3.0]
    );
    let sizes = declaration("s", "10px 50%").as_size_list().unwrap();
    assert_eq!(sizes, vec![
        Dimension::new(10.0, Unit::Px),
        Dimension::new(50.0, Unit::Percent),
    ]);
}
