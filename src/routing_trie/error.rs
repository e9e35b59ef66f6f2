//! Error types for the routing trie.
//!
//! All errors are produced at build time; lookups on a built trie are
//! total and never fail.

/// Errors that can occur while compiling a routing trie.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RoutingTrieError {
    /// Error when a route pattern violates the pattern grammar.
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern that was rejected.
        pattern: String,
        /// Which grammar rule the pattern broke.
        reason: String,
    },

    /// Error when `build` is called without any registered pattern.
    #[error("cannot build a routing trie with no registered patterns")]
    EmptyTrie,
}

impl RoutingTrieError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: reason.into(),
        }
    }
}
