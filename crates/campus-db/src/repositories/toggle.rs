//! PostgreSQL implementation of RemoteToggleClient
//!
//! A toggle is a row in an association table keyed by (entity, actor):
//! present means active. Counters are derived from the rows, never stored.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use campus_core::traits::{RemoteToggleClient, RepoResult};
use campus_core::{ActorId, EntityKey, SharedSession, ToggleState};

use super::error::map_db_error;

/// Static description of an association table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleTable {
    pub table: &'static str,
    pub entity_column: &'static str,
    pub actor_column: &'static str,
    /// SQL type the text keys are cast to (`uuid`, `bigint`, `text`)
    pub key_type: &'static str,
}

impl ToggleTable {
    pub const POST_LIKES: Self = Self::uuid_keyed("post_likes", "post_id");
    pub const COMMENT_LIKES: Self = Self::uuid_keyed("comment_likes", "comment_id");
    pub const COMMUNITY_MEMBERS: Self = Self::uuid_keyed("community_members", "community_id");
    pub const CHAT_ROOM_MUTES: Self = Self::uuid_keyed("chat_room_mutes", "room_id");

    const fn uuid_keyed(table: &'static str, entity_column: &'static str) -> Self {
        Self {
            table,
            entity_column,
            actor_column: "user_id",
            key_type: "uuid",
        }
    }

    fn delete_sql(&self) -> String {
        format!(
            "DELETE FROM {t} WHERE {e} = $1::{k} AND {a} = $2::{k}",
            t = self.table,
            e = self.entity_column,
            a = self.actor_column,
            k = self.key_type,
        )
    }

    fn insert_sql(&self) -> String {
        format!(
            "INSERT INTO {t} ({e}, {a}) VALUES ($1::{k}, $2::{k}) ON CONFLICT ({e}, {a}) DO NOTHING",
            t = self.table,
            e = self.entity_column,
            a = self.actor_column,
            k = self.key_type,
        )
    }

    fn count_sql(&self) -> String {
        format!(
            "SELECT COUNT(*) FROM {t} WHERE {e} = $1::{k}",
            t = self.table,
            e = self.entity_column,
            k = self.key_type,
        )
    }
}

/// PostgreSQL implementation of RemoteToggleClient
#[derive(Clone)]
pub struct PgToggleClient {
    pool: PgPool,
    table: ToggleTable,
    session: SharedSession,
}

impl PgToggleClient {
    /// Create a new PgToggleClient
    pub fn new(pool: PgPool, table: ToggleTable, session: SharedSession) -> Self {
        Self {
            pool,
            table,
            session,
        }
    }

    pub fn table(&self) -> ToggleTable {
        self.table
    }

    /// Read the state for `actor` without changing it
    #[instrument(skip(self), fields(table = self.table.table))]
    pub async fn fetch_state(&self, key: &EntityKey, actor: &ActorId) -> RepoResult<ToggleState> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {t} WHERE {e} = $1::{k} AND {a} = $2::{k})",
            t = self.table.table,
            e = self.table.entity_column,
            a = self.table.actor_column,
            k = self.table.key_type,
        );
        let active = sqlx::query_scalar::<_, bool>(&sql)
            .bind(key.as_str())
            .bind(actor.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count = sqlx::query_scalar::<_, i64>(&self.table.count_sql())
            .bind(key.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(ToggleState::new(active, count))
    }
}

#[async_trait]
impl RemoteToggleClient for PgToggleClient {
    fn current_actor(&self) -> Option<ActorId> {
        self.session.actor()
    }

    #[instrument(skip(self), fields(table = self.table.table))]
    async fn send_toggle(&self, key: &EntityKey, actor: &ActorId) -> RepoResult<ToggleState> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query(&self.table.delete_sql())
            .bind(key.as_str())
            .bind(actor.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

        let active = if removed == 0 {
            sqlx::query(&self.table.insert_sql())
                .bind(key.as_str())
                .bind(actor.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
            true
        } else {
            false
        };

        let count = sqlx::query_scalar::<_, i64>(&self.table.count_sql())
            .bind(key.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(key = %key, active, count, "Toggle persisted");
        Ok(ToggleState::new(active, count))
    }
}
