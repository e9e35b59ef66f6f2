//! Builder for the routing trie.
//!
//! The builder records `(pattern, value)` pairs and compiles them into an
//! immutable [`RoutingTrie`] on [`build`](RoutingTrieBuilder::build).
//! Registration itself never fails; every diagnostic, including malformed
//! patterns, surfaces from `build` so a failed build leaves no partial
//! state behind.

use tracing::debug;

use super::error::RoutingTrieError;
use super::node::{NodeData, NodeIndex, NodeKind};
use super::{RoutingTrie, RoutingTrieResult};

/// Accumulates route patterns and compiles them into a [`RoutingTrie`].
///
/// Patterns are inserted in registration order. Registering the same
/// pattern twice appends to the existing terminal node's values, so
/// duplicates are preserved.
#[derive(Debug)]
pub struct RoutingTrieBuilder<V> {
    routes: Vec<(String, V)>,
}

impl<V> RoutingTrieBuilder<V> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registers `value` under `pattern`. Chainable; the pattern is
    /// checked when the trie is built.
    pub fn add(mut self, pattern: impl Into<String>, value: V) -> Self {
        self.routes.push((pattern.into(), value));
        self
    }

    /// Compiles the registered patterns into an immutable trie.
    ///
    /// # Errors
    ///
    /// * [`RoutingTrieError::EmptyTrie`] when nothing was registered.
    /// * [`RoutingTrieError::InvalidPattern`] when a pattern violates the
    ///   grammar: it must begin with `/`, every `*` must be the final
    ///   character, and every `:` must be followed by `/` or the end of
    ///   the pattern.
    pub fn build(self) -> RoutingTrieResult<RoutingTrie<V>> {
        if self.routes.is_empty() {
            return Err(RoutingTrieError::EmptyTrie);
        }
        for (pattern, _) in &self.routes {
            validate_pattern(pattern)?;
        }

        let route_count = self.routes.len();
        let mut nodes = vec![NodeData::new(
            NodeKind::Exact { label: "/".to_owned() },
            None,
        )];
        let root = NodeIndex(0);
        for (pattern, value) in self.routes {
            insert_route(&mut nodes, root, &pattern, value);
        }

        debug!(
            routes = route_count,
            nodes = nodes.len(),
            "compiled routing trie"
        );
        Ok(RoutingTrie { nodes, root })
    }
}

impl<V> Default for RoutingTrieBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks a pattern against the grammar before any node is created.
fn validate_pattern(pattern: &str) -> RoutingTrieResult<()> {
    if pattern.is_empty() {
        return Err(RoutingTrieError::invalid_pattern(
            pattern,
            "pattern is empty",
        ));
    }
    if !pattern.starts_with('/') {
        return Err(RoutingTrieError::invalid_pattern(
            pattern,
            "pattern must begin with '/'",
        ));
    }

    let mut chars = pattern.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '*' if i != pattern.len() - 1 => {
                return Err(RoutingTrieError::invalid_pattern(
                    pattern,
                    "a catch-all '*' may only appear at the end of the pattern",
                ));
            }
            ':' => {
                if !matches!(chars.peek(), None | Some((_, '/'))) {
                    return Err(RoutingTrieError::invalid_pattern(
                        pattern,
                        "a parameter ':' must be followed by '/' or the end of the pattern",
                    ));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Inserts one validated pattern, compressing shared literal prefixes and
/// splitting existing exact nodes where the new pattern diverges.
fn insert_route<V>(nodes: &mut Vec<NodeData<V>>, root: NodeIndex, pattern: &str, value: V) {
    let mut node = root;
    // The leading '/' is the root's own label.
    let mut rest = &pattern[1..];

    loop {
        if rest.is_empty() {
            nodes[node.0].values.push(value);
            return;
        }
        match rest.chars().next() {
            Some(':') => {
                node = match nodes[node.0].parameter_child {
                    Some(child) => child,
                    None => {
                        let child = push_node(nodes, NodeKind::Parameter, node);
                        nodes[node.0].parameter_child = Some(child);
                        child
                    }
                };
                rest = &rest[1..];
            }
            Some('*') => {
                // Validation guarantees '*' terminates the pattern, so the
                // catch-all is terminal and receives the value directly.
                let child = match nodes[node.0].catch_all_child {
                    Some(child) => child,
                    None => {
                        let child = push_node(nodes, NodeKind::CatchAll, node);
                        nodes[node.0].catch_all_child = Some(child);
                        child
                    }
                };
                nodes[child.0].values.push(value);
                return;
            }
            _ => {
                let run_len = rest.find([':', '*']).unwrap_or(rest.len());
                let run = &rest[..run_len];
                match exact_child_sharing_first_char(nodes, node, run) {
                    None => {
                        let child = push_node(
                            nodes,
                            NodeKind::Exact {
                                label: run.to_owned(),
                            },
                            node,
                        );
                        nodes[node.0].exact_children.push(child);
                        node = child;
                    }
                    Some(child) => {
                        let (prefix_len, label_len) = {
                            let label = nodes[child.0].kind.label();
                            (common_prefix_len(label, run), label.len())
                        };
                        node = if prefix_len == label_len {
                            child
                        } else {
                            split_exact(nodes, child, prefix_len)
                        };
                        rest = &rest[prefix_len..];
                        continue;
                    }
                }
                rest = &rest[run_len..];
            }
        }
    }
}

fn push_node<V>(nodes: &mut Vec<NodeData<V>>, kind: NodeKind, parent: NodeIndex) -> NodeIndex {
    let id = NodeIndex(nodes.len());
    nodes.push(NodeData::new(kind, Some(parent)));
    id
}

/// Finds the exact child whose label starts with the same character as
/// `run`. At most one exists: exact siblings never share a first
/// character.
fn exact_child_sharing_first_char<V>(
    nodes: &[NodeData<V>],
    parent: NodeIndex,
    run: &str,
) -> Option<NodeIndex> {
    let first = run.chars().next();
    nodes[parent.0]
        .exact_children
        .iter()
        .copied()
        .find(|&child| nodes[child.0].kind.label().chars().next() == first)
}

/// Splits an exact node at `prefix_len` bytes: a new node takes the
/// common prefix and the original keeps its suffix, its values and its
/// children. The new node occupies the original's slot in the parent so
/// sibling order is stable.
fn split_exact<V>(nodes: &mut Vec<NodeData<V>>, child: NodeIndex, prefix_len: usize) -> NodeIndex {
    let parent = nodes[child.0]
        .parent
        .expect("split target is never the root");

    let (prefix, suffix) = {
        let label = nodes[child.0].kind.label();
        (label[..prefix_len].to_owned(), label[prefix_len..].to_owned())
    };

    let mid = NodeIndex(nodes.len());
    let mut data = NodeData::new(NodeKind::Exact { label: prefix }, Some(parent));
    data.exact_children.push(child);
    nodes.push(data);

    nodes[child.0].kind = NodeKind::Exact { label: suffix };
    nodes[child.0].parent = Some(mid);

    let slot = nodes[parent.0]
        .exact_children
        .iter()
        .position(|&c| c == child)
        .expect("split target is an exact child of its parent");
    nodes[parent.0].exact_children[slot] = mid;
    mid
}

/// Length in bytes of the longest common prefix of `a` and `b`, always on
/// a character boundary of both.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|&((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}
