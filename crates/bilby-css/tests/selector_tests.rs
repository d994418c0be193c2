//! Integration tests for selector matching and specificity.

use bilby_css::parser::{NoLoader, StylesheetParser};
use bilby_css::selector::{Selector, Specificity};
use bilby_css::stylesheet::StylesheetOrigin;
use bilby_node::{ElementData, NodeId, StyleTree};

/// Helper to parse a single selector by wrapping it in a rule
fn selector(text: &str) -> Selector {
    let sheet = StylesheetParser::new(NoLoader)
        .parse(&format!("{text} {{ color: red; }}"), StylesheetOrigin::Application);
    assert!(sheet.errors.is_empty(), "{text}: {:?}", sheet.errors);
    sheet.rule_sets.into_iter().next().expect("one rule").selector
}

/// A small widget tree:
///
/// ```text
/// panel
/// ├── button#submit.primary   (:pressed)
/// ├── label
/// ├── button
/// └── group
///     └── button.nested
/// ```
fn widget_tree() -> (StyleTree, Vec<NodeId>) {
    let mut tree = StyleTree::new();
    let panel = tree.alloc(ElementData::new("panel"));
    let submit = tree.alloc(
        ElementData::new("button")
            .with_id("submit")
            .with_class("primary")
            .with_state("pressed"),
    );
    let label = tree.alloc(ElementData::new("label").with_attr("lang", "en-US"));
    let plain = tree.alloc(ElementData::new("button"));
    let group = tree.alloc(ElementData::new("group"));
    let nested = tree.alloc(ElementData::new("button").with_class("nested"));
    tree.append_child(panel, submit);
    tree.append_child(panel, label);
    tree.append_child(panel, plain);
    tree.append_child(panel, group);
    tree.append_child(group, nested);
    (tree, vec![panel, submit, label, plain, group, nested])
}

#[test]
fn test_type_and_universal() {
    let (tree, nodes) = widget_tree();
    assert!(selector("button").matches(&tree, nodes[1]));
    assert!(!selector("button").matches(&tree, nodes[2]));
    assert!(selector("*").matches(&tree, nodes[2]));
}

#[test]
fn test_id_and_class() {
    let (tree, nodes) = widget_tree();
    assert!(selector("#submit").matches(&tree, nodes[1]));
    assert!(selector(".primary").matches(&tree, nodes[1]));
    assert!(selector("button.primary#submit").matches(&tree, nodes[1]));
    assert!(!selector(".primary").matches(&tree, nodes[3]));
}

#[test]
fn test_descendant_vs_child() {
    let (tree, nodes) = widget_tree();
    // The nested button is a descendant of panel but not its child.
    assert!(selector("panel button").matches(&tree, nodes[5]));
    assert!(!selector("panel > button").matches(&tree, nodes[5]));
    assert!(selector("panel > button").matches(&tree, nodes[1]));
    assert!(selector("panel > group > button").matches(&tree, nodes[5]));
}

#[test]
fn test_sibling_combinators() {
    let (tree, nodes) = widget_tree();
    // label + button: the plain button directly follows the label.
    assert!(selector("label + button").matches(&tree, nodes[3]));
    assert!(!selector("label + button").matches(&tree, nodes[1]));
    // button ~ group: any preceding button sibling.
    assert!(selector("button ~ group").matches(&tree, nodes[4]));
    assert!(!selector("group ~ button").matches(&tree, nodes[1]));
}

#[test]
fn test_attribute_operators() {
    let (tree, nodes) = widget_tree();
    let label = nodes[2];
    assert!(selector("[lang]").matches(&tree, label));
    assert!(selector("[lang=\"en-US\"]").matches(&tree, label));
    assert!(selector("[lang|=en]").matches(&tree, label));
    assert!(selector("[lang^=\"en\"]").matches(&tree, label));
    assert!(selector("[lang$=\"US\"]").matches(&tree, label));
    assert!(selector("[lang*=\"n-U\"]").matches(&tree, label));
    assert!(!selector("[lang|=e]").matches(&tree, label));
    assert!(!selector("[lang]").matches(&tree, nodes[1]));
}

#[test]
fn test_state_pseudo_class() {
    let (tree, nodes) = widget_tree();
    assert!(selector("button:pressed").matches(&tree, nodes[1]));
    assert!(!selector("button:pressed").matches(&tree, nodes[3]));
}

#[test]
fn test_structural_pseudo_classes() {
    let (tree, nodes) = widget_tree();
    assert!(selector(":root").matches(&tree, nodes[0]));
    assert!(!selector(":root").matches(&tree, nodes[1]));
    assert!(selector("button:first-child").matches(&tree, nodes[1]));
    assert!(selector("group:last-child").matches(&tree, nodes[4]));
    assert!(selector("label:only-of-type").matches(&tree, nodes[2]));
    assert!(!selector("button:only-of-type").matches(&tree, nodes[1]));
    assert!(selector("label:empty").matches(&tree, nodes[2]));
    assert!(!selector("group:empty").matches(&tree, nodes[4]));
}

#[test]
fn test_nth_child_odd_is_2n_plus_1() {
    let (tree, nodes) = widget_tree();
    let children = &nodes[1..5];
    for &child in children {
        assert_eq!(
            selector(":nth-child(odd)").matches(&tree, child),
            selector(":nth-child(2n+1)").matches(&tree, child),
        );
    }
    // Children 1 and 3 are the odd positions.
    assert!(selector(":nth-child(odd)").matches(&tree, nodes[1]));
    assert!(!selector(":nth-child(odd)").matches(&tree, nodes[2]));
    assert!(selector(":nth-child(odd)").matches(&tree, nodes[3]));
}

#[test]
fn test_nth_child_negative_coefficient() {
    let (tree, nodes) = widget_tree();
    // -n+3 selects the first three children only.
    assert!(selector(":nth-child(-n+3)").matches(&tree, nodes[1]));
    assert!(selector(":nth-child(-n+3)").matches(&tree, nodes[2]));
    assert!(selector(":nth-child(-n+3)").matches(&tree, nodes[3]));
    assert!(!selector(":nth-child(-n+3)").matches(&tree, nodes[4]));
}

#[test]
fn test_nth_of_type() {
    let (tree, nodes) = widget_tree();
    // The plain button is the 3rd child but the 2nd button.
    assert!(selector("button:nth-of-type(2)").matches(&tree, nodes[3]));
    assert!(!selector("button:nth-of-type(2)").matches(&tree, nodes[1]));
    assert!(selector("button:nth-last-of-type(1)").matches(&tree, nodes[3]));
}

#[test]
fn test_nth_last_child() {
    let (tree, nodes) = widget_tree();
    // Reverse indices: submit 4, label 3, plain 2, group 1.
    assert!(selector(":nth-last-child(2)").matches(&tree, nodes[3]));
    assert!(!selector(":nth-last-child(2)").matches(&tree, nodes[4]));
    assert!(selector(":nth-last-child(even)").matches(&tree, nodes[1]));
    assert!(!selector(":nth-last-child(even)").matches(&tree, nodes[2]));
}

#[test]
fn test_negation() {
    let (tree, nodes) = widget_tree();
    assert!(selector("button:not(.primary)").matches(&tree, nodes[3]));
    assert!(!selector("button:not(.primary)").matches(&tree, nodes[1]));
    assert!(selector(":not(label)").matches(&tree, nodes[1]));
}

#[test]
fn test_nested_negation_is_rejected() {
    let sheet = StylesheetParser::new(NoLoader).parse(
        ":not(:not(.a)) { color: red; }",
        StylesheetOrigin::Application,
    );
    assert!(!sheet.errors.is_empty());
}

#[test]
fn test_pseudo_elements() {
    // Archaic single-colon forms parse as pseudo-elements.
    assert_eq!(
        selector("p:first-line").subject().pseudo_element.as_deref(),
        Some("first-line")
    );
    assert_eq!(
        selector("p::before").subject().pseudo_element.as_deref(),
        Some("before")
    );
}

#[test]
fn test_namespace_selectors() {
    let sheet = StylesheetParser::new(NoLoader).parse(
        "@namespace ui url(\"app://ui\"); ui|button { color: red; } |button { color: blue; }",
        StylesheetOrigin::Application,
    );
    assert!(sheet.errors.is_empty(), "{:?}", sheet.errors);

    let mut tree = StyleTree::new();
    let root = tree.alloc(ElementData::new("panel"));
    let namespaced = tree.alloc(ElementData::new("button").with_namespace("app://ui"));
    let bare = tree.alloc(ElementData::new("button"));
    tree.append_child(root, namespaced);
    tree.append_child(root, bare);

    let prefixed = &sheet.rule_sets[0].selector;
    let no_namespace = &sheet.rule_sets[1].selector;
    assert!(prefixed.matches(&tree, namespaced));
    assert!(!prefixed.matches(&tree, bare));
    assert!(no_namespace.matches(&tree, bare));
    assert!(!no_namespace.matches(&tree, namespaced));
}

#[test]
fn test_specificity_ranking() {
    assert!(selector("#a").specificity() > selector(".a.b.c").specificity());
    assert!(selector(".a").specificity() > selector("div span").specificity());
    assert_eq!(selector("button").specificity(), Specificity(0, 0, 1));
    assert_eq!(selector("button.primary#submit").specificity(), Specificity(1, 1, 1));
    // A chain sums its sequences.
    assert_eq!(selector("panel > button.primary").specificity(), Specificity(0, 1, 2));
}

#[test]
fn test_negation_specificity_counts_argument() {
    assert_eq!(selector(":not(.busy)").specificity(), Specificity(0, 1, 0));
    assert_eq!(selector(":not(#busy)").specificity(), Specificity(1, 0, 0));
    // A pseudo-element counts as a type.
    assert_eq!(selector("p::before").specificity(), Specificity(0, 0, 2));
}
