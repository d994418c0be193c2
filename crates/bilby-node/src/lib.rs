//! Styleable node tree for the Bilby styling engine.
//!
//! This crate provides the node abstraction that selectors are matched
//! against: a tree of elements, each carrying a local name, an optional
//! namespace URI, attributes, and declared pseudo-class state (for example
//! "pressed" or "checked" on an interactive widget).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. Unlike a document tree there are no text or comment
//! nodes — every node is an element, which keeps the `nth-*` index
//! queries ([`StyleTree::child_index`] and friends) trivial.

use std::collections::{HashMap, HashSet};

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the style tree.
///
/// Provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root element is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Element data for a styleable node.
///
/// This is the surface the selector matcher sees: type name + namespace,
/// id, class set, attribute lookup, and declared pseudo-class state.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// The element's local (type) name, e.g. `button`.
    pub local_name: String,
    /// The element's namespace URI, if it belongs to one.
    pub namespace: Option<String>,
    /// The element's attribute list.
    pub attrs: AttributesMap,
    /// Declared pseudo-class states currently active on this element,
    /// e.g. "pressed", "checked", "hover". Matched by state
    /// pseudo-class selectors such as `:pressed`.
    pub states: HashSet<String>,
}

impl ElementData {
    /// Create element data with the given local name.
    #[must_use]
    pub fn new(local_name: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            ..Self::default()
        }
    }

    /// Builder-style: set the namespace URI.
    #[must_use]
    pub fn with_namespace(mut self, uri: impl Into<String>) -> Self {
        self.namespace = Some(uri.into());
        self
    }

    /// Builder-style: set an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attrs.insert(name.into(), value.into());
        self
    }

    /// Builder-style: set the `id` attribute.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    /// Builder-style: append a class to the `class` attribute.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        match self.attrs.get_mut("class") {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(class);
                self
            }
            None => self.with_attr("class", class),
        }
    }

    /// Builder-style: declare an active pseudo-class state.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        let _ = self.states.insert(state.into());
        self
    }

    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&String> {
        self.attrs.get("id")
    }

    /// Returns the set of class names from the class attribute
    /// (space-separated tokens).
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        match self.attrs.get("class") {
            Some(classlist) => classlist.split_ascii_whitespace().collect(),
            None => HashSet::new(),
        }
    }

    /// Returns an attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns true if the named pseudo-class state is active.
    #[must_use]
    pub fn has_state(&self, state: &str) -> bool {
        self.states.contains(state)
    }
}

/// A node in the style tree: element data plus tree links.
///
/// Stores indices for parent/child/sibling relationships, enabling O(1)
/// traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// The element data selectors are matched against.
    pub element: ElementData,
    /// The node's parent, or `None` for the root.
    pub parent: Option<NodeId>,
    /// The node's children, in document order.
    pub children: Vec<NodeId>,
    /// The sibling immediately following this node.
    pub next_sibling: Option<NodeId>,
    /// The sibling immediately preceding this node.
    pub prev_sibling: Option<NodeId>,
}

/// Arena-based styleable node tree with O(1) node access and traversal.
///
/// All nodes live in a contiguous vector, using indices for all
/// relationships. The first allocated node becomes the root.
#[derive(Debug, Clone, Default)]
pub struct StyleTree {
    nodes: Vec<Node>,
}

impl StyleTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new node. The first allocation becomes the root.
    pub fn alloc(&mut self, element: ElementData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            element,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// Append `child` as the last child of `parent`, fixing up sibling links.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev = self.nodes[parent.0].children.last().copied();
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = Some(child);
        }
        self.nodes[parent.0].children.push(child);
        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.prev_sibling = prev;
    }

    /// The root node, if any nodes have been allocated.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId::ROOT)
        }
    }

    /// Get a node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a node's element data by id.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id.0).map(|n| &n.element)
    }

    /// Mutable access to a node's element data (for toggling states).
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id.0).map(|n| &mut n.element)
    }

    /// A node's parent id.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// A node's children, in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map_or(&[], |n| n.children.as_slice())
    }

    /// Iterate a node's ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.parent(id);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.parent(next);
            Some(next)
        })
    }

    /// Iterate a node's preceding siblings, nearest first.
    pub fn preceding_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.nodes.get(id.0).and_then(|n| n.prev_sibling);
        std::iter::from_fn(move || {
            let next = current?;
            current = self.nodes.get(next.0).and_then(|n| n.prev_sibling);
            Some(next)
        })
    }

    /// The node immediately preceding `id` among its siblings.
    #[must_use]
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.prev_sibling)
    }

    /// 1-based position of `id` among its parent's children, or `None`
    /// for the root. This is the index `:nth-child` counts.
    #[must_use]
    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id).map(|i| i + 1)
    }

    /// Number of children of `id`'s parent, or `None` for the root.
    /// Together with [`Self::child_index`] this gives the reverse index
    /// `:nth-last-child` counts: `count - index + 1`.
    #[must_use]
    pub fn sibling_count(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        Some(self.children(parent).len())
    }

    /// 1-based position of `id` among siblings with the same local name,
    /// or `None` for the root. This is the index `:nth-of-type` counts.
    #[must_use]
    pub fn child_index_of_type(&self, id: NodeId) -> Option<usize> {
        let name = &self.element(id)?.local_name;
        let parent = self.parent(id)?;
        let mut index = 0;
        for &sibling in self.children(parent) {
            if self
                .element(sibling)
                .is_some_and(|e| e.local_name == *name)
            {
                index += 1;
            }
            if sibling == id {
                return Some(index);
            }
        }
        None
    }

    /// Number of siblings (inclusive) sharing `id`'s local name, or
    /// `None` for the root.
    #[must_use]
    pub fn sibling_count_of_type(&self, id: NodeId) -> Option<usize> {
        let name = &self.element(id)?.local_name;
        let parent = self.parent(id)?;
        Some(
            self.children(parent)
                .iter()
                .filter(|&&sibling| {
                    self.element(sibling)
                        .is_some_and(|e| e.local_name == *name)
                })
                .count(),
        )
    }

    /// Total number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tree() -> (StyleTree, NodeId, Vec<NodeId>) {
        let mut tree = StyleTree::new();
        let root = tree.alloc(ElementData::new("panel"));
        let kids = vec![
            tree.alloc(ElementData::new("button")),
            tree.alloc(ElementData::new("label")),
            tree.alloc(ElementData::new("button")),
        ];
        for &kid in &kids {
            tree.append_child(root, kid);
        }
        (tree, root, kids)
    }

    #[test]
    fn child_index_is_one_based() {
        let (tree, _, kids) = small_tree();
        assert_eq!(tree.child_index(kids[0]), Some(1));
        assert_eq!(tree.child_index(kids[2]), Some(3));
        assert_eq!(tree.child_index(NodeId::ROOT), None);
    }

    #[test]
    fn of_type_index_skips_other_names() {
        let (tree, _, kids) = small_tree();
        // Second <button> is the 3rd child but the 2nd of its type.
        assert_eq!(tree.child_index_of_type(kids[2]), Some(2));
        assert_eq!(tree.sibling_count_of_type(kids[2]), Some(2));
    }

    #[test]
    fn preceding_siblings_nearest_first() {
        let (tree, _, kids) = small_tree();
        let preceding: Vec<NodeId> = tree.preceding_siblings(kids[2]).collect();
        assert_eq!(preceding, vec![kids[1], kids[0]]);
    }

    #[test]
    fn classes_split_on_whitespace() {
        let data = ElementData::new("button").with_class("primary").with_class("large");
        assert!(data.classes().contains("primary"));
        assert!(data.classes().contains("large"));
    }
}
