//! Comment threading tests
//!
//! Run with: cargo test -p integration-tests --test comment_tree_tests

use std::collections::HashSet;

use campus_core::{build_tree, count_nodes, find_node, CommentRecord, OrphanPolicy};
use integration_tests::{
    child_ids, max_depth, preorder_ids, reply, reply_counts_consistent, root, root_ids,
};

fn sample_thread() -> Vec<CommentRecord> {
    vec![
        root("t1", "2024-03-01T09:00:00Z"),
        root("t2", "2024-03-01T12:00:00Z"),
        reply("t1-a", "t1", "2024-03-01T09:30:00Z"),
        reply("t1-b", "t1", "2024-03-01T09:10:00Z"),
        reply("t1-a-x", "t1-a", "2024-03-01T10:00:00Z"),
        reply("t2-a", "t2", "2024-03-01 12:05:00+00"),
    ]
}

#[test]
fn test_empty_input_builds_empty_forest() {
    let roots = build_tree::<serde_json::Value>(&[], OrphanPolicy::default());
    assert!(roots.is_empty());
}

#[test]
fn test_reply_counts_match_children() {
    let roots = build_tree(&sample_thread(), OrphanPolicy::default());
    assert!(reply_counts_consistent(&roots));
    assert_eq!(max_depth(&roots), 3);
}

#[test]
fn test_node_count_equals_distinct_ids() {
    let mut records = sample_thread();
    // edited copy of t1-b arrives later
    records.push(reply("t1-b", "t1", "2024-03-01T09:11:00Z"));

    let distinct: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    let roots = build_tree(&records, OrphanPolicy::default());

    assert_eq!(count_nodes(&roots), distinct.len());
    let ids = preorder_ids(&roots);
    assert_eq!(ids.iter().filter(|id| *id == "t1-b").count(), 1);
}

#[test]
fn test_orphan_promoted_to_root() {
    let records = vec![
        root("p", "2024-01-01T00:00:00Z"),
        reply("o", "deleted-parent", "2024-01-02T00:00:00Z"),
        reply("o-child", "o", "2024-01-03T00:00:00Z"),
    ];

    let roots = build_tree(&records, OrphanPolicy::PromoteToRoot);

    assert_eq!(root_ids(&roots), vec!["o", "p"]);
    let orphan = find_node(&roots, "o").unwrap();
    assert_eq!(child_ids(orphan), vec!["o-child"]);
}

#[test]
fn test_orphan_dropped_with_subtree() {
    let records = vec![
        root("p", "2024-01-01T00:00:00Z"),
        reply("o", "deleted-parent", "2024-01-02T00:00:00Z"),
        reply("o-child", "o", "2024-01-03T00:00:00Z"),
    ];

    let roots = build_tree(&records, OrphanPolicy::Drop);

    assert_eq!(root_ids(&roots), vec!["p"]);
    assert_eq!(count_nodes(&roots), 1);
}

#[test]
fn test_children_ascending_roots_descending() {
    let records = vec![
        root("T1", "2024-01-01T00:00:01Z"),
        root("P", "2024-01-01T00:00:00Z"),
        reply("C1", "P", "2024-01-01T00:00:02Z"),
        reply("C2", "P", "2024-01-01T00:00:01Z"),
        root("T2", "2024-01-01T00:00:05Z"),
    ];

    let roots = build_tree(&records, OrphanPolicy::default());

    let parent = find_node(&roots, "P").unwrap();
    assert_eq!(child_ids(parent), vec!["C2", "C1"]);
    assert_eq!(root_ids(&roots), vec!["T2", "T1", "P"]);
}

#[test]
fn test_build_is_deterministic() {
    let records = sample_thread();
    let first = build_tree(&records, OrphanPolicy::default());
    let second = build_tree(&records, OrphanPolicy::default());
    assert_eq!(first, second);
}

#[test]
fn test_mixed_timestamp_formats_sort_together() {
    let records = vec![
        root("rfc", "2024-05-01T10:00:00Z"),
        root("pg", "2024-05-01 11:00:00.123456+00"),
        root("naive", "2024-05-01 09:00:00"),
        root("junk", "yesterday"),
    ];

    let roots = build_tree(&records, OrphanPolicy::default());

    assert_eq!(root_ids(&roots), vec!["pg", "rfc", "naive", "junk"]);
}

#[test]
fn test_cycle_is_cut_not_lost() {
    let records = vec![
        root("r", "2024-01-01T00:00:00Z"),
        reply("a", "b", "2024-01-02T00:00:00Z"),
        reply("b", "a", "2024-01-03T00:00:00Z"),
    ];

    let promoted = build_tree(&records, OrphanPolicy::PromoteToRoot);
    assert_eq!(count_nodes(&promoted), 3);
    assert!(reply_counts_consistent(&promoted));

    let dropped = build_tree(&records, OrphanPolicy::Drop);
    assert_eq!(root_ids(&dropped), vec!["r"]);
}

#[test]
fn test_payload_carried_unchanged() {
    let records = sample_thread();
    let roots = build_tree(&records, OrphanPolicy::default());

    let node = find_node(&roots, "t1-a-x").unwrap();
    assert_eq!(node.payload()["content"], "comment t1-a-x");

    let json = serde_json::to_value(&roots[0]).unwrap();
    assert_eq!(json["id"], "t2");
    assert_eq!(json["reply_count"], 1);
    assert_eq!(json["children"][0]["payload"]["author_id"], "author-1");
}
