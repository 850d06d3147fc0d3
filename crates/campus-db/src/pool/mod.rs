//! Connection pool management

mod postgres;

pub use postgres::{create_pool, create_pool_from_env, PoolSettings};

pub use sqlx::postgres::PgPool;
