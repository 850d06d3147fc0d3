//! Comment threading - turns a flat, parent-referencing list into a forest
//!
//! Replies read top-to-bottom as a conversation (oldest first) while threads
//! themselves surface newest first.

mod builder;
mod timestamp;

pub use builder::{build_tree, count_nodes, find_node, OrphanPolicy, ParseOrphanPolicyError};
pub use timestamp::parse_timestamp;
