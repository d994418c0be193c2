//! Matched-rule collection and declaration resolution.
//!
//! [CSS Cascading and Inheritance Level 3](https://www.w3.org/TR/css-cascade-3/)
//!
//! Given one or more stylesheets and a node, [`matching_rule_sets`]
//! collects the rule sets whose selectors match, ordered by (origin
//! weight, specificity, source position) ascending. [`resolve`] then
//! merges their declarations into a [`StyleContext`]: later entries win,
//! except that any `!important` declaration outranks every non-important
//! one regardless of specificity.

use std::collections::HashMap;

use bilby_common::warning::warn_once;
use bilby_node::{NodeId, StyleTree};

use crate::selector::Specificity;
use crate::stylesheet::{Declaration, MediaContext, RuleSet, Stylesheet, StylesheetOrigin};
use crate::values::{ColorValue, Insets};

/// A rule set that matched a node, with its cascade sort keys.
#[derive(Debug, Clone, Copy)]
pub struct MatchedRule<'a> {
    /// The matching rule set.
    pub rule: &'a RuleSet,
    /// The origin of the stylesheet the rule came from.
    pub origin: StylesheetOrigin,
    /// The matching selector's specificity.
    pub specificity: Specificity,
}

/// Collect the rule sets matching `node` across `sheets`, sorted
/// ascending by (origin weight, specificity, source position) so that
/// applying declarations in order makes the last writer win.
///
/// Rule sets under an `@media` scope apply only when a `media` context
/// is supplied and the expression matches it.
#[must_use]
pub fn matching_rule_sets<'a>(
    sheets: &[&'a Stylesheet],
    tree: &StyleTree,
    node: NodeId,
    media: Option<&MediaContext>,
) -> Vec<MatchedRule<'a>> {
    let mut matches: Vec<MatchedRule<'a>> = Vec::new();
    for sheet in sheets {
        for rule in &sheet.rule_sets {
            if let Some(scope) = &rule.media_scope {
                if !media.is_some_and(|context| scope.matches(context)) {
                    continue;
                }
            }
            if rule.selector.matches(tree, node) {
                matches.push(MatchedRule {
                    rule,
                    origin: sheet.origin,
                    specificity: rule.selector.specificity(),
                });
            }
        }
    }
    matches.sort_by_key(|m| (m.origin.weight(), m.specificity, m.rule.position));
    matches
}

/// Merge matched rules' declarations into a per-node style context.
/// `matches` must already be cascade-sorted ascending.
#[must_use]
pub fn resolve(matches: &[MatchedRule<'_>]) -> StyleContext {
    let mut normal: HashMap<String, Declaration> = HashMap::new();
    let mut important: HashMap<String, Declaration> = HashMap::new();
    for matched in matches {
        for declaration in &matched.rule.declarations {
            let slot = if declaration.important {
                &mut important
            } else {
                &mut normal
            };
            let _ = slot.insert(declaration.name.clone(), declaration.clone());
        }
    }
    // The important overlay wins over every non-important declaration.
    for (name, declaration) in important {
        let _ = normal.insert(name, declaration);
    }
    StyleContext { properties: normal }
}

/// Match and resolve in one step.
#[must_use]
pub fn style_context(
    sheets: &[&Stylesheet],
    tree: &StyleTree,
    node: NodeId,
    media: Option<&MediaContext>,
) -> StyleContext {
    resolve(&matching_rule_sets(sheets, tree, node, media))
}

/// The cascade's output for one node: the winning declaration per
/// property.
#[derive(Debug, Clone, Default)]
pub struct StyleContext {
    properties: HashMap<String, Declaration>,
}

impl StyleContext {
    /// The winning declaration for a property.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&Declaration> {
        self.properties.get(property)
    }

    /// Iterate the resolved property names.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Number of resolved properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// True if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// A property as a color, falling back to `default` (with a
    /// deduplicated warning) when the value does not parse.
    #[must_use]
    pub fn color(&self, property: &str, default: ColorValue) -> ColorValue {
        match self.get(property).map(Declaration::as_color) {
            None => default,
            Some(Ok(color)) => color,
            Some(Err(error)) => {
                warn_once("CSS", &format!("bad color for '{property}': {error}"));
                default
            }
        }
    }

    /// A property as a number, falling back to `default` when the value
    /// does not parse.
    #[must_use]
    pub fn number(&self, property: &str, default: f32) -> f32 {
        match self.get(property).map(Declaration::as_number) {
            None => default,
            Some(Ok(value)) => value,
            Some(Err(error)) => {
                warn_once("CSS", &format!("bad number for '{property}': {error}"));
                default
            }
        }
    }

    /// A property as edge-expanded insets, falling back to zero insets
    /// when the value does not parse.
    #[must_use]
    pub fn insets(&self, property: &str) -> Insets {
        match self.get(property).map(Declaration::as_insets) {
            None => Insets::zero(),
            Some(Ok(insets)) => insets,
            Some(Err(error)) => {
                warn_once("CSS", &format!("bad insets for '{property}': {error}"));
                Insets::zero()
            }
        }
    }
}
