//! Port traits - the interface the domain needs from persistence
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (Postgres in production, fakes in tests).

use async_trait::async_trait;

use crate::entities::{ActorId, CommentRecord, EntityKey, ToggleState};
use crate::error::DomainError;

/// Result type for port operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Remote Toggle Client
// ============================================================================

#[async_trait]
pub trait RemoteToggleClient: Send + Sync {
    /// The signed-in actor, if any
    fn current_actor(&self) -> Option<ActorId>;

    /// Flip the association between `actor` and `key` in persistent storage
    /// and return the authoritative state afterwards.
    ///
    /// One call reflects exactly one toggle.
    async fn send_toggle(&self, key: &EntityKey, actor: &ActorId) -> RepoResult<ToggleState>;
}

// ============================================================================
// Comment Source
// ============================================================================

#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Flat comment list for a parent context (e.g. a post id)
    async fn comments_for(&self, context: &str) -> RepoResult<Vec<CommentRecord>>;
}
