//! Data transfer objects for service outputs

pub mod responses;

pub use responses::{CommentThread, ToggleResponse, ToggleStatus};
