//! Unit and property-based tests for the routing trie.

mod unit_tests;
