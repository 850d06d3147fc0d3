//! # campus-core
//!
//! Domain layer for campus discussions: comment threading, toggle state
//! (likes, memberships, mutes), domain events, and the ports persistence
//! must implement. This crate has zero dependencies on infrastructure.

pub mod entities;
pub mod error;
pub mod events;
pub mod session;
pub mod thread;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    ActorId, CommentRecord, EntityKey, RejectReason, ThreadedCommentNode, ToggleOutcome,
    TogglePhase, ToggleState,
};
pub use error::DomainError;
pub use events::{DomainEvent, ToggleEvent};
pub use session::{Session, SharedSession};
pub use thread::{build_tree, count_nodes, find_node, OrphanPolicy};
pub use traits::{CommentSource, RemoteToggleClient, RepoResult};
