//! Domain entities - core business objects

mod comment;
mod toggle;

pub use comment::{CommentRecord, ThreadedCommentNode};
pub use toggle::{ActorId, EntityKey, RejectReason, ToggleOutcome, TogglePhase, ToggleState};
