//! Node representation for the routing trie.
//!
//! Nodes live in an arena owned by the trie and reference each other by
//! index. Parent links are therefore plain lookups and can never form an
//! ownership cycle or keep a node alive on their own.

use std::fmt;

use super::RoutingTrie;

/// Index of a node inside the trie's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeIndex(pub(crate) usize);

/// What a node matches against the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeKind {
    /// Matches its label character by character.
    Exact { label: String },
    /// Matches one non-empty run of characters up to the next `/`.
    Parameter,
    /// Matches the entire remainder of the path, including nothing.
    CatchAll,
}

impl NodeKind {
    /// The label as it is spelled in a pattern.
    pub(crate) fn label(&self) -> &str {
        match self {
            NodeKind::Exact { label } => label,
            NodeKind::Parameter => ":",
            NodeKind::CatchAll => "*",
        }
    }
}

/// Arena record for a single trie node.
///
/// `exact_children` keeps insertion order; no two entries share a first
/// character. A node has at most one parameter child and at most one
/// catch-all child, and catch-all nodes never have children of their own.
#[derive(Debug)]
pub(crate) struct NodeData<V> {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) exact_children: Vec<NodeIndex>,
    pub(crate) parameter_child: Option<NodeIndex>,
    pub(crate) catch_all_child: Option<NodeIndex>,
    /// Values registered at this node, in registration order. Duplicates
    /// are kept: registering the same pattern and value twice stores two
    /// copies.
    pub(crate) values: Vec<V>,
}

impl<V> NodeData<V> {
    pub(crate) fn new(kind: NodeKind, parent: Option<NodeIndex>) -> Self {
        Self {
            kind,
            parent,
            exact_children: Vec::new(),
            parameter_child: None,
            catch_all_child: None,
            values: Vec::new(),
        }
    }
}

/// A borrowed view of a single node, for tests and introspection.
///
/// Two `Node`s compare equal when they identify the same node of the same
/// trie.
pub struct Node<'t, V> {
    pub(crate) trie: &'t RoutingTrie<V>,
    pub(crate) id: NodeIndex,
}

impl<'t, V> Node<'t, V> {
    /// The values registered at this node, in registration order. Empty
    /// for purely structural nodes.
    pub fn values(&self) -> &'t [V] {
        &self.trie.node(self.id).values
    }

    /// The parent node, or `None` for the root.
    pub fn parent(&self) -> Option<Node<'t, V>> {
        self.trie.node(self.id).parent.map(|id| Node {
            trie: self.trie,
            id,
        })
    }

    /// The node's edge label as stored: the literal text for exact nodes
    /// (`"/"` for the root), `":"` for parameter nodes and `"*"` for
    /// catch-all nodes.
    pub fn path(&self) -> &'t str {
        self.trie.node(self.id).kind.label()
    }
}

impl<'t, V> Clone for Node<'t, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'t, V> Copy for Node<'t, V> {}

impl<'t, V> PartialEq for Node<'t, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.trie, other.trie) && self.id == other.id
    }
}

impl<'t, V> Eq for Node<'t, V> {}

impl<'t, V> fmt::Debug for Node<'t, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("path", &self.path())
            .field("values", &self.values().len())
            .finish()
    }
}
