//! Comment database model

use sqlx::types::Json;
use sqlx::FromRow;

/// Row shape produced by the comment listing query.
///
/// Ids and timestamps arrive as text; the payload is assembled in SQL.
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: String,
    pub parent_id: Option<String>,
    pub created_at: String,
    pub payload: Json<serde_json::Value>,
}
