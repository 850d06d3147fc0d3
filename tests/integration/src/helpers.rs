//! Test helpers for integration tests
//!
//! Tracing setup, service wiring, and tree walkers.

use std::sync::Arc;

use anyhow::Result;
use campus_common::{try_init_tracing_with_config, TracingConfig};
use campus_core::traits::{CommentSource, RemoteToggleClient};
use campus_core::{OrphanPolicy, Session, ThreadedCommentNode};
use campus_service::{ServiceContext, ToggleKind, ToggleSettings};

/// Install a test subscriber once; later calls are no-ops
pub fn init_test_tracing() {
    let _ = try_init_tracing_with_config(&TracingConfig::development());
}

/// Context with one toggle client per listed kind
pub fn test_context(
    source: Arc<dyn CommentSource>,
    policy: OrphanPolicy,
    clients: Vec<(ToggleKind, Arc<dyn RemoteToggleClient>)>,
    settings: ToggleSettings,
) -> Result<ServiceContext> {
    let builder = clients.into_iter().fold(
        ServiceContext::builder()
            .session(Session::new_shared())
            .comment_source(source)
            .orphan_policy(policy)
            .toggle_settings(settings),
        |builder, (kind, client)| builder.toggle_client(kind, client),
    );
    Ok(builder.build()?)
}

/// Ids in depth-first pre-order
pub fn preorder_ids(roots: &[ThreadedCommentNode]) -> Vec<String> {
    let mut ids = Vec::new();
    let mut stack: Vec<&ThreadedCommentNode> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        ids.push(node.id().to_string());
        stack.extend(node.children().iter().rev());
    }
    ids
}

/// Ids of the nodes at the top level
pub fn root_ids(roots: &[ThreadedCommentNode]) -> Vec<&str> {
    roots.iter().map(ThreadedCommentNode::id).collect()
}

/// Ids of the direct replies to `node`
pub fn child_ids(node: &ThreadedCommentNode) -> Vec<&str> {
    node.children().iter().map(ThreadedCommentNode::id).collect()
}

/// Every node in the forest has `reply_count == children.len()`
pub fn reply_counts_consistent(roots: &[ThreadedCommentNode]) -> bool {
    let mut stack: Vec<&ThreadedCommentNode> = roots.iter().collect();
    while let Some(node) = stack.pop() {
        if node.reply_count() != node.children().len() {
            return false;
        }
        stack.extend(node.children());
    }
    true
}

/// Deepest nesting level, roots at 1
pub fn max_depth(roots: &[ThreadedCommentNode]) -> usize {
    let mut deepest = 0;
    let mut stack: Vec<(&ThreadedCommentNode, usize)> = roots.iter().map(|n| (n, 1)).collect();
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        stack.extend(node.children().iter().map(|c| (c, depth + 1)));
    }
    deepest
}
