//! Database models - rows as SQLx decodes them

mod comment;

pub use comment::CommentModel;
