//! Unit tests for the routing trie: tree structure under prefix
//! compression, wildcard precedence, lookup modes and build failures.

use crate::routing_trie::{RoutingTrie, RoutingTrieError};

/// Asserts that the walk for `path` lands on a node with the given
/// values, whose parent carries the given label.
fn assert_node(trie: &RoutingTrie<i32>, path: &str, parent_label: &str, values: &[i32]) {
    let found = trie
        .find_node(path)
        .unwrap_or_else(|| panic!("no node found for {path}"));
    assert_eq!(found.values(), values, "values at {path}");
    assert_eq!(
        found.parent().expect("non-root node").path(),
        parent_label,
        "parent label at {path}"
    );
}

#[test]
fn test_trie_structure() {
    let trie = RoutingTrie::builder()
        .add("/abc/123", 1)
        .add("/abc/133", 2)
        .add("/abc/134", 3)
        .add("/abc/134", 1)
        .add("/abc/134/*", 4)
        .add("/abc/124/:", 2)
        .build()
        .unwrap();

    // The shared literal prefix is compressed into single nodes; the
    // divergent tails fan out beneath them.
    let mut out = Vec::new();
    trie.dump(&mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\
/ (0)
  abc/1 (0)
    2 (0)
      3 (1)
      4/ (0)
        : (1)
    3 (0)
      3 (1)
      4 (2)
        / (0)
          * (1)
"
    );

    // Structural node: the walk lands on it but it holds no values.
    let intermediate = trie.find_node("/abc/1").unwrap();
    assert!(intermediate.values().is_empty());
    assert_eq!(intermediate.parent().unwrap().path(), "/");
    assert!(intermediate.parent().unwrap().parent().is_none());

    let found = trie.find_node("/abc/123").unwrap();
    assert_eq!(found.values(), [1]);
    assert_eq!(found.parent(), trie.find_node_exact("/abc/12"));

    let found = trie.find_node("/abc/133").unwrap();
    assert_eq!(found.values(), [2]);
    assert_eq!(found.parent(), trie.find_node_exact("/abc/13"));

    // Duplicate registration kept both values, in registration order.
    let found = trie.find_node("/abc/134").unwrap();
    assert_eq!(found.values(), [3, 1]);
    assert_eq!(found.parent(), trie.find_node_exact("/abc/13"));

    // The catch-all absorbs any remainder, slashes included.
    let found = trie.find_node("/abc/134/5678").unwrap();
    assert_eq!(found.path(), "*");
    assert_eq!(found.values(), [4]);
    assert_eq!(found.parent(), trie.find_node_exact("/abc/134/"));

    let found = trie.find_node("/abc/134/5/6/7/8").unwrap();
    assert_eq!(found.path(), "*");
    assert_eq!(found.values(), [4]);

    // The parameter consumes exactly one segment.
    let found = trie.find_node("/abc/124/5678").unwrap();
    assert_eq!(found.path(), ":");
    assert_eq!(found.values(), [2]);
    assert_eq!(found.parent(), trie.find_node_exact("/abc/124/"));
    assert!(trie.find_node("/abc/124/5/6/7/8").is_none());

    // Paths that leave the tree.
    assert!(trie.find_node("/abc/111").is_none());
    assert!(trie.find_node("/hello").is_none());

    // The root itself: always present, never valued here.
    let root = trie.find_node("/").unwrap();
    assert!(root.values().is_empty());
    assert!(root.parent().is_none());

    // Intermediate nodes are addressable by their exact spelling.
    let found = trie.find_node("/abc/12").unwrap();
    assert!(found.values().is_empty());
    assert_eq!(found.parent(), trie.find_node_exact("/abc/1"));

    let found = trie.find_node("/abc/124/").unwrap();
    assert!(found.values().is_empty());
    assert_eq!(found.parent(), trie.find_node_exact("/abc/12"));
}

#[test]
fn test_parameter_and_catch_all() {
    let trie = RoutingTrie::builder()
        .add("/users/:", 0)
        .add("/users/:", 1)
        .add("/users/:/movies", 2)
        .add("/users/:/books", 3)
        .add("/users/:/books/harry_potter", 4)
        .add("/users/:/books/harry_potter*", 5)
        .add("/users/:/books/:", 6)
        .add("/users/:/movies/*", 7)
        .add("/:", 8)
        .add("/*", 9)
        .build()
        .unwrap();

    assert_node(&trie, "/users/tom", "users/", &[0, 1]);
    assert_node(&trie, "/users/tom/movies", "/", &[2]);
    assert_node(&trie, "/users/tom/books", "/", &[3]);
    assert_node(&trie, "/users/tom/books/harry_potter", "/", &[4]);
    assert_node(&trie, "/users/tom/books/harry_potter1", "harry_potter", &[5]);
    assert_node(&trie, "/users/tom/books/the_hunger_games", "/", &[6]);
    assert_node(&trie, "/users/tom/movies/dunkirk", "/", &[7]);
    assert_node(&trie, "/users/tom/movies/spider_man", "/", &[7]);
    assert_node(&trie, "/faq", "/", &[8]);
    assert_node(&trie, "/events/2017", "/", &[9]);

    // "/" is fully consumed by the root, which has no values, so the
    // walk falls through to the root's catch-all.
    assert_node(&trie, "/", "/", &[9]);
    assert_eq!(trie.find_node("/").unwrap().path(), "*");

    // Literal text beats the parameter, which beats the catch-all.
    assert_eq!(trie.find("/users/tom"), [0, 1]);
    assert_eq!(trie.find("/faq"), [8]);
    assert_eq!(trie.find("/users/tom/books/xyz"), [6]);

    // The greedy walk keeps going after the best match.
    assert_eq!(trie.find_all("/users/tom"), [&0, &1, &9]);
    assert_eq!(
        trie.find_all("/users/tom/books/harry_potter"),
        [&4, &5, &6, &9]
    );
}

#[test]
fn test_find_first_and_find_all() {
    let trie = RoutingTrie::builder()
        .add("/users/:", 0)
        .add("/users/*", 1)
        .add("/users/:/movies", 2)
        .add("/users/:/books", 3)
        .add("/users/:/books/harry_potter", 4)
        .add("/users/:/books/harry_potter*", 5)
        .add("/users/:/books/:", 6)
        .add("/users/:/movies/*", 7)
        .add("/:", 8)
        .add("/*", 9)
        .build()
        .unwrap();

    assert_eq!(trie.find("/users/1"), [0]);
    assert_eq!(trie.find_all("/users/1"), [&0, &1, &9]);

    assert_eq!(trie.find("/users/1/movies/1"), [7]);
    assert_eq!(trie.find_all("/users/1/movies/1"), [&7, &1, &9]);

    // The best match's values lead the greedy result.
    assert_eq!(
        trie.find_all("/users/tom/books/harry_potter"),
        [&4, &5, &6, &1, &9]
    );
}

#[test]
fn test_exceptional_cases() {
    let err = RoutingTrie::<i32>::builder().build().unwrap_err();
    assert_eq!(err, RoutingTrieError::EmptyTrie);

    for pattern in ["*", "*012", ":", ":012", "/*abc", "/:abc", ""] {
        let err = RoutingTrie::builder().add(pattern, 0).build().unwrap_err();
        assert!(
            matches!(err, RoutingTrieError::InvalidPattern { .. }),
            "pattern {pattern:?} should have been rejected, got {err:?}"
        );
    }
}

#[test]
fn test_parameter_requires_nonempty_segment() {
    let trie = RoutingTrie::builder().add("/users/:", 0).build().unwrap();

    assert!(trie.find("/users/").is_empty());
    assert!(trie.find("/users//tom").is_empty());

    // The walk still lands on the structural node before the parameter.
    let found = trie.find_node("/users/").unwrap();
    assert_eq!(found.path(), "users/");
    assert!(found.values().is_empty());
}

#[test]
fn test_backtracks_out_of_a_dead_end_literal_branch() {
    let trie = RoutingTrie::builder()
        .add("/users/jim", 1)
        .add("/users/kim", 2)
        .add("/*", 9)
        .build()
        .unwrap();

    // "users/" matches and its subtree dead-ends on "tom"; the walk
    // backs out to the root's catch-all.
    assert_eq!(trie.find("/users/tom"), [9]);
    assert_eq!(trie.find("/users/jim"), [1]);
    assert_eq!(trie.find("/users/kim"), [2]);
}

#[test]
fn test_find_continues_past_valueless_landing() {
    let trie = RoutingTrie::builder()
        .add("/abc", 1)
        .add("/abd", 2)
        .add("/:", 8)
        .build()
        .unwrap();

    // "/ab" lands on the structural split node. `find` keeps looking and
    // reaches the parameter; `find_node` reports the landing itself.
    assert_eq!(trie.find("/ab"), [8]);
    assert_eq!(trie.find_all("/ab"), [&8]);

    let landing = trie.find_node("/ab").unwrap();
    assert_eq!(landing.path(), "ab");
    assert!(landing.values().is_empty());
}

#[test]
fn test_duplicate_values_preserved_in_order() {
    let trie = RoutingTrie::builder()
        .add("/x", 1)
        .add("/x", 2)
        .add("/x", 1)
        .build()
        .unwrap();

    assert_eq!(trie.find("/x"), [1, 2, 1]);
}

#[test]
fn test_find_node_exact_addresses_node_boundaries_only() {
    let trie = RoutingTrie::builder()
        .add("/users/:", 0)
        .add("/users/:/books/*", 1)
        .build()
        .unwrap();

    assert_eq!(trie.find_node_exact("/").unwrap().path(), "/");
    assert_eq!(trie.find_node_exact("/users/").unwrap().path(), "users/");
    assert_eq!(trie.find_node_exact("/users/:").unwrap().path(), ":");
    assert_eq!(
        trie.find_node_exact("/users/:/books/").unwrap().path(),
        "/books/"
    );
    assert_eq!(
        trie.find_node_exact("/users/:/books/*").unwrap().path(),
        "*"
    );

    // Mid-label positions are not addressable.
    assert!(trie.find_node_exact("/users").is_none());
    assert!(trie.find_node_exact("/users/:/bo").is_none());
    assert!(trie.find_node_exact("/zzz").is_none());
}

#[test]
fn test_catch_all_is_reused_across_registrations() {
    let trie = RoutingTrie::builder()
        .add("/files/*", 1)
        .add("/files/*", 2)
        .build()
        .unwrap();

    assert_eq!(trie.find("/files/a/b/c"), [1, 2]);
    assert_eq!(trie.find("/files/"), [1, 2]);
}
