//! Threaded comment tree builder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::entities::{CommentRecord, ThreadedCommentNode};

use super::timestamp::parse_timestamp;

/// What to do with a comment whose parent is not in the batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Treat it as if it had no parent
    #[default]
    #[serde(alias = "promote")]
    PromoteToRoot,
    /// Leave it (and its replies) out
    Drop,
}

/// Error when parsing an [`OrphanPolicy`] from a string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown orphan policy: {0} (expected \"promote\" or \"drop\")")]
pub struct ParseOrphanPolicyError(String);

impl FromStr for OrphanPolicy {
    type Err = ParseOrphanPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "promote" | "promote_to_root" => Ok(Self::PromoteToRoot),
            "drop" => Ok(Self::Drop),
            other => Err(ParseOrphanPolicyError(other.to_string())),
        }
    }
}

impl fmt::Display for OrphanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PromoteToRoot => f.write_str("promote"),
            Self::Drop => f.write_str("drop"),
        }
    }
}

/// Build a forest of threaded comments from a flat list.
///
/// - Duplicate ids: the last occurrence wins, earlier ones are ignored.
/// - Replies are ordered oldest first; root threads newest first. Ties keep
///   input order.
/// - A reply whose parent is missing, or whose ancestor chain loops back on
///   itself, is an orphan and follows `policy`.
/// - Unparsable timestamps sort as the Unix epoch.
pub fn build_tree<P: Clone>(
    records: &[CommentRecord<P>],
    policy: OrphanPolicy,
) -> Vec<ThreadedCommentNode<P>> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        index.insert(record.id.as_str(), i);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut top = Vec::new();
    for (i, record) in records.iter().enumerate() {
        // shadowed by a later duplicate
        if index.get(record.id.as_str()) != Some(&i) {
            continue;
        }
        match &record.parent_id {
            None => top.push(i),
            Some(parent) => match index.get(parent.as_str()) {
                Some(&p) => children[p].push(i),
                None if policy == OrphanPolicy::PromoteToRoot => top.push(i),
                None => {}
            },
        }
    }

    let mut assembler = Assembler::new(records, children);
    assembler.sort_desc(&mut top);

    let mut forest: Vec<(usize, ThreadedCommentNode<P>)> = top
        .into_iter()
        .filter_map(|i| assembler.assemble(i).map(|node| (i, node)))
        .collect();

    // whatever is still unplaced hangs off a cycle; root each cycle at the
    // member where the parent walk first repeats so the back-edge is cut
    // inside the cycle and other replies stay under their parent
    if policy == OrphanPolicy::PromoteToRoot {
        for (i, record) in records.iter().enumerate() {
            if index.get(record.id.as_str()) != Some(&i) || assembler.placed[i] {
                continue;
            }
            let member = cycle_member(records, &index, i);
            if let Some(node) = assembler.assemble(member) {
                forest.push((member, node));
            }
        }
        forest.sort_by_key(|(i, _)| Reverse(assembler.stamps[*i]));
    }

    forest.into_iter().map(|(_, node)| node).collect()
}

/// Follow parent links from `start` until an index repeats
fn cycle_member<P>(
    records: &[CommentRecord<P>],
    index: &HashMap<&str, usize>,
    start: usize,
) -> usize {
    let mut seen = HashSet::new();
    let mut current = start;
    while seen.insert(current) {
        match records[current]
            .parent_id
            .as_deref()
            .and_then(|parent| index.get(parent))
        {
            Some(&parent) => current = parent,
            None => break,
        }
    }
    current
}

/// Total number of nodes in a forest
pub fn count_nodes<P>(roots: &[ThreadedCommentNode<P>]) -> usize {
    roots.len() + roots.iter().map(ThreadedCommentNode::descendant_count).sum::<usize>()
}

/// Depth-first lookup of a node by comment id
pub fn find_node<'a, P>(
    roots: &'a [ThreadedCommentNode<P>],
    id: &str,
) -> Option<&'a ThreadedCommentNode<P>> {
    let mut stack: Vec<&ThreadedCommentNode<P>> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if node.id() == id {
            return Some(node);
        }
        stack.extend(node.children().iter().rev());
    }
    None
}

/// Builds nodes bottom-up without recursion so deep reply chains are safe
struct Assembler<'a, P> {
    records: &'a [CommentRecord<P>],
    children: Vec<Vec<usize>>,
    stamps: Vec<DateTime<Utc>>,
    placed: Vec<bool>,
    built: Vec<Option<ThreadedCommentNode<P>>>,
}

impl<'a, P: Clone> Assembler<'a, P> {
    fn new(records: &'a [CommentRecord<P>], children: Vec<Vec<usize>>) -> Self {
        Self {
            records,
            children,
            stamps: records
                .iter()
                .map(|r| parse_timestamp(&r.created_at))
                .collect(),
            placed: vec![false; records.len()],
            built: records.iter().map(|_| None).collect(),
        }
    }

    fn sort_desc(&self, indices: &mut [usize]) {
        indices.sort_by_key(|&i| Reverse(self.stamps[i]));
    }

    fn assemble(&mut self, root: usize) -> Option<ThreadedCommentNode<P>> {
        if self.placed[root] {
            return None;
        }
        self.placed[root] = true;

        // pre-order walk; each node keeps only the children it claimed first
        let mut order = Vec::new();
        let mut kept: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            order.push(i);
            for &child in &self.children[i] {
                if !self.placed[child] {
                    self.placed[child] = true;
                    kept.entry(i).or_default().push(child);
                    stack.push(child);
                }
            }
        }

        for &i in order.iter().rev() {
            let mut claimed = kept.remove(&i).unwrap_or_default();
            claimed.sort_by_key(|&c| self.stamps[c]);
            let nodes = claimed
                .into_iter()
                .filter_map(|c| self.built[c].take())
                .collect();
            self.built[i] = Some(ThreadedCommentNode::new(self.records[i].clone(), nodes));
        }

        self.built[root].take()
    }
}
