//! Comment model -> entity mapper

use campus_core::CommentRecord;

use crate::models::CommentModel;

impl From<CommentModel> for CommentRecord {
    fn from(model: CommentModel) -> Self {
        CommentRecord {
            id: model.id,
            parent_id: model.parent_id,
            created_at: model.created_at,
            payload: model.payload.0,
        }
    }
}
