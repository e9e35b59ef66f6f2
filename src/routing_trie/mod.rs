//! Path-pattern routing trie.
//!
//! This module provides the lookup structure at the heart of request
//! dispatch: route patterns are compiled once into a prefix-compressed
//! trie, and every incoming path is resolved against it in time
//! proportional to the path length, independent of how many routes were
//! registered.
//!
//! Patterns are plain path strings with two reserved markers:
//!
//! - `:` matches exactly one path segment (a non-empty run of characters
//!   up to the next `/`)
//! - `*` matches the entire remainder of the path, including nothing, and
//!   may only appear at the end of a pattern
//!
//! When several patterns match one path, the most specific wins: at every
//! node, literal text beats a parameter, and a parameter beats a
//! catch-all.
//!
//! # Example
//!
//! ```
//! use alanui::routing_trie::RoutingTrie;
//!
//! let trie = RoutingTrie::builder()
//!     .add("/users/:", "user")
//!     .add("/users/:/posts", "posts")
//!     .add("/static/*", "asset")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(trie.find("/users/42"), ["user"]);
//! assert_eq!(trie.find("/users/42/posts"), ["posts"]);
//! assert_eq!(trie.find("/static/css/site.css"), ["asset"]);
//! assert!(trie.find("/nothing/here").is_empty());
//! ```
//!
//! # Performance characteristics
//!
//! - Build: O(total pattern length) amortized
//! - Lookup: O(path length) with a small per-node constant for the
//!   exact/parameter/catch-all alternatives
//! - `find` walks without allocating; `find_all` allocates only the
//!   result vector

mod builder;
mod error;
mod node;

use std::io;

pub use builder::RoutingTrieBuilder;
pub use error::RoutingTrieError;
pub use node::Node;

use node::{NodeData, NodeIndex};

/// Result type for routing trie operations.
pub type RoutingTrieResult<T> = Result<T, RoutingTrieError>;

/// An immutable path-pattern routing trie.
///
/// Built once via [`RoutingTrieBuilder`], then shared freely: the trie
/// has no interior mutability, so any number of threads may call the
/// lookup methods concurrently without coordination.
///
/// The root is always an exact node labelled `/`; values registered
/// under the bare pattern `"/"` live directly on it.
#[derive(Debug)]
pub struct RoutingTrie<V> {
    nodes: Vec<NodeData<V>>,
    root: NodeIndex,
}

impl<V> RoutingTrie<V> {
    /// Creates a builder for a new trie.
    pub fn builder() -> RoutingTrieBuilder<V> {
        RoutingTrieBuilder::new()
    }

    /// Returns the values of the single best-matching terminal node, in
    /// registration order, or an empty slice when no registered pattern
    /// matches `path`.
    ///
    /// "Best" is the structural precedence applied at every node during
    /// the walk: an exact child is tried first, then the parameter child,
    /// then the catch-all child. Nodes without values are not matches;
    /// the walk backtracks past them.
    pub fn find(&self, path: &str) -> &[V] {
        let Some(at) = self.enter_root(path) else {
            return &[];
        };
        match self.walk(self.root, path, at, &mut |id| !self.node(id).values.is_empty()) {
            Some(id) => &self.node(id).values,
            None => &[],
        }
    }

    /// Returns the values of every matching terminal node, concatenated
    /// in precedence order: the best match's values come first, and for
    /// every node reached the exact subtree's matches precede the
    /// parameter subtree's, which precede the node's catch-all.
    ///
    /// Duplicate values registered under several matching patterns are
    /// all present.
    pub fn find_all(&self, path: &str) -> Vec<&V> {
        let mut found = Vec::new();
        if let Some(at) = self.enter_root(path) {
            self.walk(self.root, path, at, &mut |id| {
                found.extend(self.node(id).values.iter());
                false
            });
        }
        found
    }

    /// Returns the node the matching walk lands on for `path`, values or
    /// not, or `None` when no walk consumes the whole path.
    ///
    /// A landing node without values falls through to its catch-all
    /// child when it has one (a catch-all matches the empty remainder).
    /// Unlike [`find`](Self::find), the walk does not backtrack past a
    /// valueless landing, so this is a structural probe: it answers
    /// "where does this path end up", not "which route serves it".
    pub fn find_node(&self, path: &str) -> Option<Node<'_, V>> {
        let at = self.enter_root(path)?;
        let id = self.walk(self.root, path, at, &mut |id| {
            let data = self.node(id);
            !data.values.is_empty() || data.catch_all_child.is_none()
        })?;
        Some(Node { trie: self, id })
    }

    /// Returns the node whose labels, concatenated from the root, spell
    /// exactly `path`, with parameter and catch-all nodes spelled `:`
    /// and `*`. Returns `None` when `path` stops in the middle of a
    /// label.
    pub fn find_node_exact(&self, path: &str) -> Option<Node<'_, V>> {
        let mut id = self.root;
        let mut at = self.enter_root(path)?;
        'descend: while at < path.len() {
            let rest = &path[at..];
            let data = self.node(id);
            // Labels of sibling nodes start with pairwise-distinct
            // characters, so at most one child can match.
            for child in data
                .exact_children
                .iter()
                .copied()
                .chain(data.parameter_child)
                .chain(data.catch_all_child)
            {
                let label = self.node(child).kind.label();
                if rest.starts_with(label) {
                    id = child;
                    at += label.len();
                    continue 'descend;
                }
            }
            return None;
        }
        Some(Node { trie: self, id })
    }

    /// Writes an indented rendering of the tree to `out`: one node per
    /// line, two spaces per depth level, the node's label and its value
    /// count. Children are printed exact-first in insertion order, then
    /// the parameter child, then the catch-all child, so the output is
    /// deterministic for a given insertion sequence.
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.dump_node(out, self.root, 0)
    }

    /// Number of nodes in the trie, including structural ones.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, id: NodeIndex) -> &NodeData<V> {
        &self.nodes[id.0]
    }

    /// Consumes the root's `/` label, yielding the walk's start offset.
    fn enter_root(&self, path: &str) -> Option<usize> {
        let label = self.node(self.root).kind.label();
        path.starts_with(label).then(|| label.len())
    }

    /// Depth-first walk with per-node precedence exact > parameter >
    /// catch-all. `visit` is called for every node that consumes the
    /// whole path (and for catch-all children, which always do); the
    /// walk stops at the first node `visit` accepts and returns it.
    ///
    /// A node is entered with its own label already consumed; `at` is
    /// the offset of the first unconsumed path byte.
    fn walk<F>(&self, id: NodeIndex, path: &str, at: usize, visit: &mut F) -> Option<NodeIndex>
    where
        F: FnMut(NodeIndex) -> bool,
    {
        let data = self.node(id);
        if at == path.len() {
            if visit(id) {
                return Some(id);
            }
            // The empty remainder still satisfies a catch-all.
            if let Some(catch_all) = data.catch_all_child {
                if visit(catch_all) {
                    return Some(catch_all);
                }
            }
            return None;
        }

        let rest = &path[at..];
        let exact = data
            .exact_children
            .iter()
            .copied()
            .find(|&child| rest.starts_with(self.node(child).kind.label()));
        if let Some(child) = exact {
            let label_len = self.node(child).kind.label().len();
            if let Some(found) = self.walk(child, path, at + label_len, visit) {
                return Some(found);
            }
        }

        if let Some(param) = data.parameter_child {
            // A parameter consumes up to the next '/', and never nothing.
            let segment_len = rest.find('/').unwrap_or(rest.len());
            if segment_len > 0 {
                if let Some(found) = self.walk(param, path, at + segment_len, visit) {
                    return Some(found);
                }
            }
        }

        if let Some(catch_all) = data.catch_all_child {
            if visit(catch_all) {
                return Some(catch_all);
            }
        }
        None
    }

    fn dump_node<W: io::Write>(&self, out: &mut W, id: NodeIndex, depth: usize) -> io::Result<()> {
        let data = self.node(id);
        writeln!(
            out,
            "{:indent$}{} ({})",
            "",
            data.kind.label(),
            data.values.len(),
            indent = depth * 2
        )?;
        for &child in &data.exact_children {
            self.dump_node(out, child, depth + 1)?;
        }
        if let Some(param) = data.parameter_child {
            self.dump_node(out, param, depth + 1)?;
        }
        if let Some(catch_all) = data.catch_all_child {
            self.dump_node(out, catch_all, depth + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
