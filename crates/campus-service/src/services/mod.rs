//! Business logic services
//!
//! Optimistic toggles, comment threading, and the context wiring them to
//! their ports.

pub mod comments;
pub mod context;
pub mod error;
pub mod toggle;

pub use comments::CommentThreadService;
pub use context::{ServiceContext, ServiceContextBuilder, ToggleKind};
pub use error::{ServiceError, ServiceResult};
pub use toggle::{PendingToggle, ToggleCoordinator, ToggleSettings};
