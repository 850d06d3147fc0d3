//! Response DTOs
//!
//! All response DTOs implement `Serialize` for JSON output.

use serde::Serialize;

use campus_core::{ThreadedCommentNode, ToggleOutcome, ToggleState};

/// A fully threaded comment section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentThread {
    /// Post (or other owner) the comments belong to
    pub context: String,
    /// Root threads, newest first
    pub roots: Vec<ThreadedCommentNode>,
    /// Nodes in the forest, replies included
    pub total: usize,
}

impl CommentThread {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Result status of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleStatus {
    Applied,
    Rejected,
    Failed,
}

/// Toggle result as shown to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleResponse {
    pub status: ToggleStatus,
    /// State now visible for the key
    pub state: ToggleState,
    /// Reject or error code, absent when applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ToggleResponse {
    /// Build from an outcome; `visible` is used unless the server state was applied
    pub fn from_outcome(outcome: &ToggleOutcome, visible: ToggleState) -> Self {
        match outcome {
            ToggleOutcome::Applied(state) => Self {
                status: ToggleStatus::Applied,
                state: *state,
                code: None,
            },
            ToggleOutcome::Rejected(reason) => Self {
                status: ToggleStatus::Rejected,
                state: visible,
                code: Some(reason.code().to_string()),
            },
            ToggleOutcome::Failed(err) => Self {
                status: ToggleStatus::Failed,
                state: visible,
                code: Some(err.code().to_string()),
            },
        }
    }
}
