//! Signed-in actor holder shared by clients that need `current_actor`

use parking_lot::RwLock;
use std::sync::Arc;

use crate::entities::ActorId;

/// Thread-safe slot for the authenticated actor
#[derive(Debug, Default)]
pub struct Session {
    actor: RwLock<Option<ActorId>>,
}

/// Shared session handle
pub type SharedSession = Arc<Session>;

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that is already signed in
    pub fn signed_in(actor: ActorId) -> Self {
        Self {
            actor: RwLock::new(Some(actor)),
        }
    }

    pub fn new_shared() -> SharedSession {
        Arc::new(Self::new())
    }

    pub fn sign_in(&self, actor: ActorId) {
        *self.actor.write() = Some(actor);
    }

    /// Returns the actor that was signed in, if any
    pub fn sign_out(&self) -> Option<ActorId> {
        self.actor.write().take()
    }

    pub fn actor(&self) -> Option<ActorId> {
        self.actor.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.actor.read().is_some()
    }
}
