//! Toggle entities - like/join/mute style boolean associations with a counter

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Opaque key of a toggleable entity (post id, community id, room id, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for EntityKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Opaque identifier of the authenticated actor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Whether the actor holds the association, and how many actors do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleState {
    pub active: bool,
    pub count: i64,
}

impl ToggleState {
    pub const fn new(active: bool, count: i64) -> Self {
        Self { active, count }
    }

    /// The state the UI shows before the server answers.
    ///
    /// The count never drops below zero, even when local state is inconsistent.
    pub fn optimistic_flip(self) -> Self {
        let active = !self.active;
        let count = if active {
            self.count.saturating_add(1)
        } else {
            self.count.saturating_sub(1).max(0)
        };
        Self { active, count }
    }
}

/// Per-key phase of the optimistic toggle state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum TogglePhase {
    Idle(ToggleState),
    Pending {
        previous: ToggleState,
        optimistic: ToggleState,
    },
}

impl TogglePhase {
    /// State to render: the optimistic guess while pending
    pub fn visible(&self) -> ToggleState {
        match *self {
            Self::Idle(state) => state,
            Self::Pending { optimistic, .. } => optimistic,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

impl Default for TogglePhase {
    fn default() -> Self {
        Self::Idle(ToggleState::default())
    }
}

/// Why a toggle was refused before any state changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    AlreadyPending,
    NotAuthenticated,
}

impl RejectReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyPending => "already_pending",
            Self::NotAuthenticated => "not_authenticated",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Result of a toggle request
#[derive(Debug)]
#[must_use]
pub enum ToggleOutcome {
    /// Server confirmed; carries the authoritative state
    Applied(ToggleState),
    /// Refused up front; nothing changed
    Rejected(RejectReason),
    /// Remote call failed; local state was already rolled back
    Failed(DomainError),
}

impl ToggleOutcome {
    pub fn applied(&self) -> Option<ToggleState> {
        match self {
            Self::Applied(state) => Some(*state),
            _ => None,
        }
    }

    pub fn rejected(&self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}
