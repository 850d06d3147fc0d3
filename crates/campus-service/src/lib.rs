//! # campus-service
//!
//! Application layer: the optimistic toggle coordinator, the comment thread
//! service, and the DTOs they return.

pub mod dto;
pub mod services;

pub use dto::{CommentThread, ToggleResponse, ToggleStatus};
pub use services::{
    CommentThreadService, PendingToggle, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, ToggleCoordinator, ToggleKind, ToggleSettings,
};
