//! Selector model, specificity, and tree matching.
//!
//! Conformance target is [Selectors Level 3](https://www.w3.org/TR/selectors-3/).
//! A parsed selector is a tree: leaf [`SelectorSequence`]s (a type or
//! universal selector plus modifier simple selectors) joined by
//! [`Selector::Combinator`] nodes. Combinator chains associate left, so
//! the right-hand operand of a combinator is always a sequence — matching
//! starts at the subject (rightmost) sequence and walks outward.

use std::ops::Add;

use strum_macros::{Display, EnumString};

use bilby_node::{ElementData, NodeId, StyleTree};

/// [§ 6.3 Attribute selectors](https://www.w3.org/TR/selectors-3/#attribute-selectors)
/// The operator of an attribute selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeOperator {
    /// `[att]` — "the element has the att attribute, whatever the value".
    Exists,
    /// `[att=val]` — "exactly 'val'".
    Equals,
    /// `[att~=val]` — "a whitespace-separated list of words, one of which
    /// is exactly 'val'".
    Includes,
    /// `[att|=val]` — "exactly 'val' or beginning with 'val' immediately
    /// followed by '-'".
    DashMatch,
    /// `[att^=val]` — "begins with the prefix 'val'".
    PrefixMatch,
    /// `[att$=val]` — "ends with the suffix 'val'".
    SuffixMatch,
    /// `[att*=val]` — "contains at least one instance of 'val'".
    SubstringMatch,
}

/// [§ 6.6.4 Structural pseudo-classes](https://www.w3.org/TR/selectors-3/#structural-pseudos)
/// The closed set of argument-free structural pseudo-classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum StructuralPseudoClass {
    /// ":root represents an element that is the root of the document."
    Root,
    /// "Same as :nth-child(1)."
    FirstChild,
    /// "Same as :nth-last-child(1)."
    LastChild,
    /// "Same as :nth-of-type(1)."
    FirstOfType,
    /// "Same as :nth-last-of-type(1)."
    LastOfType,
    /// "An element that has a parent element and whose parent element has
    /// no other element children."
    OnlyChild,
    /// "An element that has a parent element and whose parent element has
    /// no other element children with the same expanded element name."
    OnlyOfType,
    /// "An element that has no children at all."
    Empty,
}

/// The four `nth-*` functional pseudo-classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum NthKind {
    /// Counts siblings before the element, inclusive.
    NthChild,
    /// Counts siblings after the element, inclusive.
    NthLastChild,
    /// Counts same-type siblings before the element, inclusive.
    NthOfType,
    /// Counts same-type siblings after the element, inclusive.
    NthLastOfType,
}

/// Namespace component of a type or universal selector, resolved against
/// the stylesheet's `@namespace` declarations at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamespacePrefix {
    /// `*|name`, an unprefixed name with no default namespace declared,
    /// or the fallback after an unresolvable prefix: any namespace.
    Any,
    /// `|name`: only elements with no namespace.
    NoNamespace,
    /// A resolved namespace URI.
    Uri(String),
}

impl NamespacePrefix {
    fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Any => true,
            Self::NoNamespace => element.namespace.is_none(),
            Self::Uri(uri) => element.namespace.as_deref() == Some(uri),
        }
    }
}

/// A modifier attached to a selector sequence: everything after the type
/// or universal part.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `[att]`, `[att=val]`, and the other operator forms.
    Attribute {
        /// Attribute name.
        name: String,
        /// Match operator.
        op: AttributeOperator,
        /// Operand value; `None` for the bare existence form.
        value: Option<String>,
    },
    /// An argument-free structural pseudo-class.
    PseudoClass(StructuralPseudoClass),
    /// A declared-state pseudo-class such as `:pressed` or `:checked`,
    /// matched against the element's active state set.
    State(String),
    /// [§ 6.6.4] An `nth-*` functional pseudo-class with `an+b` argument:
    /// matches 1-based index `i` when `i = a·n + b` for some n ≥ 0.
    Nth {
        /// Which sibling index is counted.
        kind: NthKind,
        /// The coefficient `a`. Zero means "index equals remainder".
        modulus: i32,
        /// The offset `b`.
        remainder: i32,
    },
    /// [§ 6.6.7 The negation pseudo-class](https://www.w3.org/TR/selectors-3/#negation)
    /// `:not(...)` wrapping exactly one simple selector. The parser
    /// rejects nested negations.
    Not(Box<Selector>),
}

/// A simple-selector sequence: namespace + type (or universal) + ordered
/// modifiers + optional trailing pseudo-element.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorSequence {
    /// Namespace constraint on the element.
    pub namespace: NamespacePrefix,
    /// The element type name; `None` is the universal selector.
    pub local_name: Option<String>,
    /// Id/class/attribute/pseudo-class modifiers, in source order.
    pub modifiers: Vec<SimpleSelector>,
    /// A trailing pseudo-element such as `before`. Attached to the
    /// rightmost sequence of a combinator chain.
    pub pseudo_element: Option<String>,
}

impl SelectorSequence {
    /// The universal selector with no modifiers.
    #[must_use]
    pub const fn universal() -> Self {
        Self {
            namespace: NamespacePrefix::Any,
            local_name: None,
            modifiers: Vec::new(),
            pseudo_element: None,
        }
    }

    /// A type selector in any namespace.
    #[must_use]
    pub fn typed(local_name: impl Into<String>) -> Self {
        Self {
            local_name: Some(local_name.into()),
            ..Self::universal()
        }
    }
}

/// [§ 8 Combinators](https://www.w3.org/TR/selectors-3/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinatorKind {
    /// Whitespace: "describes an element that is the descendant of
    /// another element in the document tree".
    Descendant,
    /// `>`: "describes a childhood relationship between two elements".
    Child,
    /// `~`: "the elements represented by the two sequences share the same
    /// parent and the first precedes (not necessarily immediately) the
    /// second".
    Sibling,
    /// `+`: same-parent, immediately preceding.
    AdjacentSibling,
}

/// A parsed selector: a single sequence, or a left-associating combinator
/// tree whose right operand is always a sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// A simple-selector sequence.
    Sequence(SelectorSequence),
    /// Two selectors related by a combinator.
    Combinator {
        /// The structural relationship.
        kind: CombinatorKind,
        /// The ancestor/preceding side; may itself be a combinator.
        left: Box<Selector>,
        /// The subject side; never a combinator.
        right: Box<Selector>,
    },
}

impl Selector {
    /// Wrap `left` and `right` in a combinator node.
    #[must_use]
    pub fn combine(kind: CombinatorKind, left: Self, right: Self) -> Self {
        debug_assert!(
            matches!(right, Self::Sequence(_)),
            "combinator chains associate left"
        );
        Self::Combinator {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// The rightmost sequence — the subject the selector describes.
    #[must_use]
    pub fn subject(&self) -> &SelectorSequence {
        match self {
            Self::Sequence(sequence) => sequence,
            Self::Combinator { right, .. } => right.subject(),
        }
    }

    /// Decide whether this selector matches `node` within `tree`.
    #[must_use]
    pub fn matches(&self, tree: &StyleTree, node: NodeId) -> bool {
        match self {
            Self::Sequence(sequence) => sequence_matches(sequence, tree, node),
            Self::Combinator { kind, left, right } => {
                if !right.matches(tree, node) {
                    return false;
                }
                match kind {
                    CombinatorKind::Descendant => tree
                        .ancestors(node)
                        .any(|ancestor| left.matches(tree, ancestor)),
                    CombinatorKind::Child => tree
                        .parent(node)
                        .is_some_and(|parent| left.matches(tree, parent)),
                    CombinatorKind::Sibling => tree
                        .preceding_siblings(node)
                        .any(|sibling| left.matches(tree, sibling)),
                    CombinatorKind::AdjacentSibling => tree
                        .previous_sibling(node)
                        .is_some_and(|sibling| left.matches(tree, sibling)),
                }
            }
        }
    }

    /// [§ 9 Calculating a selector's specificity](https://www.w3.org/TR/selectors-3/#specificity)
    /// "Concatenating the three numbers a-b-c gives the specificity."
    #[must_use]
    pub fn specificity(&self) -> Specificity {
        match self {
            Self::Sequence(sequence) => sequence_specificity(sequence),
            Self::Combinator { left, right, .. } => left.specificity() + right.specificity(),
        }
    }
}

/// Specificity tuple `(id count, class+attribute+pseudo-class count,
/// type+pseudo-element count)`, compared lexicographically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

fn sequence_specificity(sequence: &SelectorSequence) -> Specificity {
    let mut total = Specificity::default();
    if sequence.local_name.is_some() {
        total.2 += 1;
    }
    if sequence.pseudo_element.is_some() {
        total.2 += 1;
    }
    for modifier in &sequence.modifiers {
        total = total + modifier_specificity(modifier);
    }
    total
}

fn modifier_specificity(modifier: &SimpleSelector) -> Specificity {
    match modifier {
        SimpleSelector::Id(_) => Specificity(1, 0, 0),
        SimpleSelector::Class(_)
        | SimpleSelector::Attribute { .. }
        | SimpleSelector::PseudoClass(_)
        | SimpleSelector::State(_)
        | SimpleSelector::Nth { .. } => Specificity(0, 1, 0),
        // "Selectors inside the negation pseudo-class are counted like
        // any other, but the negation itself does not count as a
        // pseudo-class."
        SimpleSelector::Not(inner) => inner.specificity(),
    }
}

fn sequence_matches(sequence: &SelectorSequence, tree: &StyleTree, node: NodeId) -> bool {
    let Some(element) = tree.element(node) else {
        return false;
    };
    if !sequence.namespace.matches(element) {
        return false;
    }
    if let Some(name) = &sequence.local_name {
        if element.local_name != *name {
            return false;
        }
    }
    sequence
        .modifiers
        .iter()
        .all(|modifier| modifier_matches(modifier, tree, node, element))
}

fn modifier_matches(
    modifier: &SimpleSelector,
    tree: &StyleTree,
    node: NodeId,
    element: &ElementData,
) -> bool {
    match modifier {
        SimpleSelector::Id(id) => element.id().is_some_and(|v| v == id),
        SimpleSelector::Class(class) => element.classes().contains(class.as_str()),
        SimpleSelector::Attribute { name, op, value } => {
            attribute_matches(element, name, *op, value.as_deref())
        }
        SimpleSelector::PseudoClass(pseudo) => structural_matches(*pseudo, tree, node),
        SimpleSelector::State(state) => element.has_state(state),
        SimpleSelector::Nth {
            kind,
            modulus,
            remainder,
        } => nth_index(*kind, tree, node)
            .is_some_and(|index| nth_matches(*modulus, *remainder, index)),
        SimpleSelector::Not(inner) => !inner.matches(tree, node),
    }
}

fn attribute_matches(
    element: &ElementData,
    name: &str,
    op: AttributeOperator,
    value: Option<&str>,
) -> bool {
    let Some(actual) = element.attr(name) else {
        return false;
    };
    let Some(expected) = value else {
        return matches!(op, AttributeOperator::Exists);
    };
    match op {
        AttributeOperator::Exists => true,
        AttributeOperator::Equals => actual == expected,
        AttributeOperator::Includes => actual.split_ascii_whitespace().any(|w| w == expected),
        AttributeOperator::DashMatch => {
            actual == expected
                || actual
                    .strip_prefix(expected)
                    .is_some_and(|rest| rest.starts_with('-'))
        }
        // "If 'val' is the empty string then the selector does not
        // represent anything."
        AttributeOperator::PrefixMatch => !expected.is_empty() && actual.starts_with(expected),
        AttributeOperator::SuffixMatch => !expected.is_empty() && actual.ends_with(expected),
        AttributeOperator::SubstringMatch => !expected.is_empty() && actual.contains(expected),
    }
}

fn structural_matches(pseudo: StructuralPseudoClass, tree: &StyleTree, node: NodeId) -> bool {
    match pseudo {
        StructuralPseudoClass::Root => tree.parent(node).is_none(),
        StructuralPseudoClass::FirstChild => tree.child_index(node) == Some(1),
        StructuralPseudoClass::LastChild => {
            tree.child_index(node).is_some() && tree.child_index(node) == tree.sibling_count(node)
        }
        StructuralPseudoClass::FirstOfType => tree.child_index_of_type(node) == Some(1),
        StructuralPseudoClass::LastOfType => {
            tree.child_index_of_type(node).is_some()
                && tree.child_index_of_type(node) == tree.sibling_count_of_type(node)
        }
        StructuralPseudoClass::OnlyChild => tree.sibling_count(node) == Some(1),
        StructuralPseudoClass::OnlyOfType => tree.sibling_count_of_type(node) == Some(1),
        StructuralPseudoClass::Empty => tree.children(node).is_empty(),
    }
}

/// The 1-based index the given `nth-*` kind counts, or `None` for the
/// root (which has no siblings to count).
fn nth_index(kind: NthKind, tree: &StyleTree, node: NodeId) -> Option<i32> {
    let index = match kind {
        NthKind::NthChild => tree.child_index(node)?,
        NthKind::NthLastChild => tree.sibling_count(node)? - tree.child_index(node)? + 1,
        NthKind::NthOfType => tree.child_index_of_type(node)?,
        NthKind::NthLastOfType => {
            tree.sibling_count_of_type(node)? - tree.child_index_of_type(node)? + 1
        }
    };
    i32::try_from(index).ok()
}

/// `an+b` membership: the 1-based `index` matches when `index = a·n + b`
/// for some integer n ≥ 0. A zero modulus degenerates to an exact index
/// test; a negative modulus counts downward from `b`.
fn nth_matches(modulus: i32, remainder: i32, index: i32) -> bool {
    if modulus == 0 {
        return index == remainder;
    }
    let diff = index - remainder;
    diff % modulus == 0 && diff / modulus >= 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nth_membership() {
        // 2n+1: odd positions.
        assert!(nth_matches(2, 1, 1));
        assert!(nth_matches(2, 1, 5));
        assert!(!nth_matches(2, 1, 4));
        // -n+3: positions 1..=3 only.
        assert!(nth_matches(-1, 3, 1));
        assert!(nth_matches(-1, 3, 3));
        assert!(!nth_matches(-1, 3, 4));
        // Bare integer: modulus 0.
        assert!(nth_matches(0, 2, 2));
        assert!(!nth_matches(0, 2, 4));
    }

    #[test]
    fn specificity_orders_lexicographically() {
        assert!(Specificity(1, 0, 0) > Specificity(0, 10, 10));
        assert!(Specificity(0, 1, 0) > Specificity(0, 0, 10));
    }

    #[test]
    fn negation_counts_its_argument() {
        let not_class = Selector::Sequence(SelectorSequence {
            modifiers: vec![SimpleSelector::Not(Box::new(Selector::Sequence(
                SelectorSequence {
                    modifiers: vec![SimpleSelector::Class("busy".into())],
                    ..SelectorSequence::universal()
                },
            )))],
            ..SelectorSequence::universal()
        });
        assert_eq!(not_class.specificity(), Specificity(0, 1, 0));
    }
}
