//! Comment entities - flat records and threaded nodes

use serde::{Deserialize, Serialize};

/// A comment as fetched from storage: flat, optionally pointing at a parent.
///
/// The payload (author, text, reaction data) is opaque to the domain layer and
/// is carried through tree building unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord<P = serde_json::Value> {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub created_at: String,
    pub payload: P,
}

impl<P> CommentRecord<P> {
    /// Create a top-level comment record
    pub fn new(id: impl Into<String>, created_at: impl Into<String>, payload: P) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            created_at: created_at.into(),
            payload,
        }
    }

    /// Create a reply to `parent_id`
    pub fn reply(
        id: impl Into<String>,
        parent_id: impl Into<String>,
        created_at: impl Into<String>,
        payload: P,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: Some(parent_id.into()),
            created_at: created_at.into(),
            payload,
        }
    }

    /// Check if this record declares a parent
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// A comment with its direct replies nested beneath it.
///
/// Built fresh by [`crate::thread::build_tree`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadedCommentNode<P = serde_json::Value> {
    #[serde(flatten)]
    record: CommentRecord<P>,
    children: Vec<ThreadedCommentNode<P>>,
    reply_count: usize,
}

impl<P> ThreadedCommentNode<P> {
    pub(crate) fn new(record: CommentRecord<P>, children: Vec<ThreadedCommentNode<P>>) -> Self {
        let reply_count = children.len();
        Self {
            record,
            children,
            reply_count,
        }
    }

    pub fn record(&self) -> &CommentRecord<P> {
        &self.record
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn payload(&self) -> &P {
        &self.record.payload
    }

    /// Direct replies, oldest first
    pub fn children(&self) -> &[ThreadedCommentNode<P>] {
        &self.children
    }

    /// Number of direct replies
    #[inline]
    pub fn reply_count(&self) -> usize {
        self.reply_count
    }

    /// Number of nodes anywhere below this one
    pub fn descendant_count(&self) -> usize {
        let mut total = 0;
        let mut stack: Vec<&Self> = vec![self];
        while let Some(node) = stack.pop() {
            total += node.children.len();
            stack.extend(node.children.iter());
        }
        total
    }
}
