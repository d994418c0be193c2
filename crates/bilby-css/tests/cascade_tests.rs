//! Integration tests for matched-rule collection and resolution.

use bilby_css::cascade::{matching_rule_sets, resolve, style_context};
use bilby_css::parser::{NoLoader, StylesheetParser};
use bilby_css::stylesheet::{MediaContext, MediaValue, Stylesheet, StylesheetOrigin};
use bilby_css::values::{ColorValue, Dimension, Unit};
use bilby_node::{ElementData, NodeId, StyleTree};

fn sheet(source: &str, origin: StylesheetOrigin) -> Stylesheet {
    let sheet = StylesheetParser::new(NoLoader).parse(source, origin);
    assert!(sheet.errors.is_empty(), "{:?}", sheet.errors);
    sheet
}

/// panel > button#submit.primary
fn tree_with_button() -> (StyleTree, NodeId) {
    let mut tree = StyleTree::new();
    let panel = tree.alloc(ElementData::new("panel"));
    let button = tree.alloc(
        ElementData::new("button")
            .with_id("submit")
            .with_class("primary"),
    );
    tree.append_child(panel, button);
    (tree, button)
}

#[test]
fn test_higher_specificity_wins() {
    let (tree, button) = tree_with_button();
    let app = sheet(
        "#submit { color: red; } .primary { color: blue; }",
        StylesheetOrigin::Application,
    );
    let style = style_context(&[&app], &tree, button, None);
    assert_eq!(style.color("color", ColorValue::BLACK), ColorValue::rgb(255, 0, 0));
}

#[test]
fn test_important_outranks_specificity() {
    let (tree, button) = tree_with_button();
    let app = sheet(
        ".primary { color: blue !important; } #submit { color: red; }",
        StylesheetOrigin::Application,
    );
    let style = style_context(&[&app], &tree, button, None);
    assert_eq!(style.color("color", ColorValue::BLACK), ColorValue::rgb(0, 0, 255));
}

#[test]
fn test_source_order_breaks_specificity_ties() {
    let (tree, button) = tree_with_button();
    let app = sheet(
        ".primary { color: red; } .primary { color: blue; }",
        StylesheetOrigin::Application,
    );
    let style = style_context(&[&app], &tree, button, None);
    assert_eq!(style.color("color", ColorValue::BLACK), ColorValue::rgb(0, 0, 255));
}

#[test]
fn test_origin_weight_orders_stylesheets() {
    let (tree, button) = tree_with_button();
    // The user-agent rule is more specific, but user origin outweighs it.
    let agent = sheet("#submit { color: red; }", StylesheetOrigin::UserAgent);
    let user = sheet(".primary { color: blue; }", StylesheetOrigin::User);
    let style = style_context(&[&agent, &user], &tree, button, None);
    assert_eq!(style.color("color", ColorValue::BLACK), ColorValue::rgb(0, 0, 255));
}

#[test]
fn test_inline_origin_wins() {
    let (tree, button) = tree_with_button();
    let app = sheet("#submit { color: red; }", StylesheetOrigin::Application);
    let inline = StylesheetParser::new(NoLoader).parse_inline("color: green");
    let style = style_context(&[&app, &inline], &tree, button, None);
    assert_eq!(style.color("color", ColorValue::BLACK), ColorValue::rgb(0, 128, 0));
}

#[test]
fn test_matches_are_sorted_ascending() {
    let (tree, button) = tree_with_button();
    let app = sheet(
        "#submit { color: red; } button { color: blue; } .primary { color: green; }",
        StylesheetOrigin::Application,
    );
    let matches = matching_rule_sets(&[&app], &tree, button, None);
    assert_eq!(matches.len(), 3);
    let specificities: Vec<_> = matches.iter().map(|m| m.specificity).collect();
    let mut sorted = specificities.clone();
    sorted.sort();
    assert_eq!(specificities, sorted);
}

#[test]
fn test_media_scoped_rules_need_a_matching_context() {
    let (tree, button) = tree_with_button();
    let app = sheet(
        "button { color: blue; } @media (min-width: 400px) { button { color: red; } }",
        StylesheetOrigin::Application,
    );

    // No context: the scoped rule is ignored.
    let unscoped = style_context(&[&app], &tree, button, None);
    assert_eq!(unscoped.color("color", ColorValue::BLACK), ColorValue::rgb(0, 0, 255));

    let wide = MediaContext::new()
        .with_feature("width", MediaValue::Dimension(Dimension::new(800.0, Unit::Px)));
    let scoped = style_context(&[&app], &tree, button, Some(&wide));
    assert_eq!(scoped.color("color", ColorValue::BLACK), ColorValue::rgb(255, 0, 0));

    let narrow = MediaContext::new()
        .with_feature("width", MediaValue::Dimension(Dimension::new(320.0, Unit::Px)));
    let too_small = style_context(&[&app], &tree, button, Some(&narrow));
    assert_eq!(too_small.color("color", ColorValue::BLACK), ColorValue::rgb(0, 0, 255));
}

#[test]
fn test_non_matching_selectors_contribute_nothing() {
    let (tree, button) = tree_with_button();
    let app = sheet("label { color: red; }", StylesheetOrigin::Application);
    let style = style_context(&[&app], &tree, button, None);
    assert!(style.is_empty());
    assert_eq!(style.get("color"), None);
}

#[test]
fn test_bad_value_falls_back_to_default() {
    let (tree, button) = tree_with_button();
    let app = sheet("button { color: chartreuse-ish; }", StylesheetOrigin::Application);
    let style = style_context(&[&app], &tree, button, None);
    assert_eq!(style.color("color", ColorValue::WHITE), ColorValue::WHITE);
}

#[test]
fn test_resolve_merges_properties_across_rules() {
    let (tree, button) = tree_with_button();
    let app = sheet(
        "button { color: red; padding: 2px; } .primary { color: blue; }",
        StylesheetOrigin::Application,
    );
    let matches = matching_rule_sets(&[&app], &tree, button, None);
    let style = resolve(&matches);
    assert_eq!(style.len(), 2);
    // color is overridden by the more specific rule, padding survives.
    assert_eq!(style.color("color", ColorValue::BLACK), ColorValue::rgb(0, 0, 255));
    assert_eq!(style.insets("padding").top, Dimension::new(2.0, Unit::Px));
}
