//! # campus-db
//!
//! PostgreSQL implementations of the ports defined in `campus-core`, via SQLx.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - `PgToggleClient` (likes, memberships, mutes) and `PgCommentSource`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use campus_core::Session;
//! use campus_db::{create_pool_from_env, PgToggleClient, ToggleTable};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool_from_env().await?;
//!     let session = Session::new_shared();
//!     let likes = PgToggleClient::new(pool, ToggleTable::POST_LIKES, session);
//!
//!     // Hand `likes` to a ToggleCoordinator...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, PgPool, PoolSettings};
pub use repositories::{PgCommentSource, PgToggleClient, ToggleTable};
