//! PostgreSQL implementation of CommentSource

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use campus_core::traits::{CommentSource, RepoResult};
use campus_core::CommentRecord;

use crate::models::CommentModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CommentSource, keyed by post
#[derive(Clone)]
pub struct PgCommentSource {
    pool: PgPool,
}

impl PgCommentSource {
    /// Create a new PgCommentSource
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentSource for PgCommentSource {
    #[instrument(skip(self))]
    async fn comments_for(&self, context: &str) -> RepoResult<Vec<CommentRecord>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r#"
            SELECT
                c.id::text AS id,
                c.parent_id::text AS parent_id,
                COALESCE(
                    to_char(c.created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS.US"Z"'),
                    ''
                ) AS created_at,
                jsonb_build_object(
                    'author_id', c.author_id::text,
                    'content', c.content,
                    'reactions', COALESCE(c.reactions, '{}'::jsonb)
                ) AS payload
            FROM comments c
            WHERE c.post_id = $1::uuid
            ORDER BY c.created_at
            "#,
        )
        .bind(context)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(CommentRecord::from).collect())
    }
}
