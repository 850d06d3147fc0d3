//! Port implementations
//!
//! PostgreSQL implementations of the port traits defined in campus-core.

mod comment;
mod error;
mod toggle;

pub use comment::PgCommentSource;
pub use toggle::{PgToggleClient, ToggleTable};
