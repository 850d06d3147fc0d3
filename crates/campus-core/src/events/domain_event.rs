//! Domain events - emitted when toggle state changes
//!
//! Observers (UI bindings, realtime fan-out) subscribe to these instead of
//! reading coordinator state directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{EntityKey, ToggleState};

/// All possible domain events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    /// Optimistic value is now visible; request in flight
    ToggleStarted(ToggleEvent),
    /// Server answered; state reconciled to its values
    ToggleConfirmed(ToggleEvent),
    /// Request failed or was abandoned; state restored to the snapshot
    ToggleRolledBack(ToggleEvent),
}

impl DomainEvent {
    pub fn key(&self) -> &EntityKey {
        match self {
            Self::ToggleStarted(e) | Self::ToggleConfirmed(e) | Self::ToggleRolledBack(e) => {
                &e.key
            }
        }
    }

    /// State observers should render after this event
    pub fn state(&self) -> ToggleState {
        match self {
            Self::ToggleStarted(e) | Self::ToggleConfirmed(e) | Self::ToggleRolledBack(e) => {
                e.state
            }
        }
    }

    /// Get the event name for dispatch
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::ToggleStarted(_) => "TOGGLE_STARTED",
            Self::ToggleConfirmed(_) => "TOGGLE_CONFIRMED",
            Self::ToggleRolledBack(_) => "TOGGLE_ROLLED_BACK",
        }
    }
}

/// Payload shared by all toggle events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleEvent {
    pub key: EntityKey,
    pub state: ToggleState,
    pub at: DateTime<Utc>,
}

impl ToggleEvent {
    pub fn new(key: EntityKey, state: ToggleState) -> Self {
        Self {
            key,
            state,
            at: Utc::now(),
        }
    }
}
