//! Comment thread service
//!
//! Fetches the flat comment list for a post and threads it.

use std::sync::Arc;

use tracing::{debug, instrument};

use campus_core::traits::CommentSource;
use campus_core::{build_tree, count_nodes, CommentRecord, OrphanPolicy};

use crate::dto::CommentThread;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment thread service
#[derive(Clone)]
pub struct CommentThreadService {
    source: Arc<dyn CommentSource>,
    policy: OrphanPolicy,
}

impl CommentThreadService {
    /// Create a new CommentThreadService
    pub fn new(source: Arc<dyn CommentSource>, policy: OrphanPolicy) -> Self {
        Self { source, policy }
    }

    /// Use the source and orphan policy wired into `ctx`
    pub fn from_context(ctx: &ServiceContext) -> Self {
        Self::new(ctx.comment_source_shared(), ctx.orphan_policy())
    }

    pub fn policy(&self) -> OrphanPolicy {
        self.policy
    }

    /// Fetch and thread every comment under `context`
    #[instrument(skip(self))]
    pub async fn thread_for(&self, context: &str) -> ServiceResult<CommentThread> {
        let context = context.trim();
        if context.is_empty() {
            return Err(ServiceError::validation("context must not be empty"));
        }

        let records = self.source.comments_for(context).await?;
        Ok(self.thread_from_records(context, &records))
    }

    /// Thread an already fetched list
    pub fn thread_from_records(&self, context: &str, records: &[CommentRecord]) -> CommentThread {
        let roots = build_tree(records, self.policy);
        let total = count_nodes(&roots);
        debug!(
            context,
            fetched = records.len(),
            roots = roots.len(),
            total,
            "Comment thread built"
        );

        CommentThread {
            context: context.to_string(),
            roots,
            total,
        }
    }
}
