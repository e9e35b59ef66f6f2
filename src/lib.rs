//! Alanui Routing Trie Library
//!
//! This library contains the dispatch core of an HTTP server: a compact,
//! immutable lookup structure that maps request paths to previously
//! registered route values. Patterns are compiled once by a builder and
//! then served read-only to any number of concurrent lookups.
//!
//! # Architecture
//!
//! The library is designed with the following principles in mind:
//! - Build-then-read lifecycle: a single owner compiles the trie, readers
//!   never coordinate
//! - Prefix compression so lookup cost tracks the path length, not the
//!   number of registered routes
//! - No interior mutability and no locks on the read path
//! - Comprehensive error reporting at build time; the read path is total

// Re-export public modules
pub mod routing_trie;

pub use routing_trie::{
    Node, RoutingTrie, RoutingTrieBuilder, RoutingTrieError, RoutingTrieResult,
};

/// Version information for the Alanui library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
