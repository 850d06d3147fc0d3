//! Service context - dependency container for services
//!
//! Holds the comment source, the session, and one toggle coordinator per
//! kind of association.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use campus_common::AppConfig;
use campus_core::traits::{CommentSource, RemoteToggleClient};
use campus_core::{OrphanPolicy, SharedSession};
use campus_db::{PgCommentSource, PgPool, PgToggleClient, ToggleTable};

use super::error::{ServiceError, ServiceResult};
use super::toggle::{ToggleCoordinator, ToggleSettings};

/// Kinds of toggleable association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleKind {
    PostLike,
    CommentLike,
    CommunityMembership,
    ChatRoomMute,
}

impl ToggleKind {
    pub const ALL: [Self; 4] = [
        Self::PostLike,
        Self::CommentLike,
        Self::CommunityMembership,
        Self::ChatRoomMute,
    ];

    /// Backing association table
    pub fn table(self) -> ToggleTable {
        match self {
            Self::PostLike => ToggleTable::POST_LIKES,
            Self::CommentLike => ToggleTable::COMMENT_LIKES,
            Self::CommunityMembership => ToggleTable::COMMUNITY_MEMBERS,
            Self::ChatRoomMute => ToggleTable::CHAT_ROOM_MUTES,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PostLike => "post_like",
            Self::CommentLike => "comment_like",
            Self::CommunityMembership => "community_membership",
            Self::ChatRoomMute => "chat_room_mute",
        }
    }
}

impl fmt::Display for ToggleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    session: SharedSession,
    comment_source: Arc<dyn CommentSource>,
    orphan_policy: OrphanPolicy,
    toggles: HashMap<ToggleKind, Arc<ToggleCoordinator>>,
}

impl ServiceContext {
    /// Wire every port to PostgreSQL
    pub fn postgres(pool: PgPool, session: SharedSession, config: &AppConfig) -> Self {
        let settings = ToggleSettings::from(&config.toggle);
        let toggles = ToggleKind::ALL
            .into_iter()
            .map(|kind| {
                let client: Arc<dyn RemoteToggleClient> = Arc::new(PgToggleClient::new(
                    pool.clone(),
                    kind.table(),
                    session.clone(),
                ));
                (kind, ToggleCoordinator::new_shared(client, settings.clone()))
            })
            .collect();

        Self {
            session,
            comment_source: Arc::new(PgCommentSource::new(pool)),
            orphan_policy: config.comments.orphan_policy,
            toggles,
        }
    }

    /// Start a builder for custom wiring
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the signed-in session
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Get the comment source
    pub fn comment_source(&self) -> &dyn CommentSource {
        self.comment_source.as_ref()
    }

    pub fn comment_source_shared(&self) -> Arc<dyn CommentSource> {
        Arc::clone(&self.comment_source)
    }

    pub fn orphan_policy(&self) -> OrphanPolicy {
        self.orphan_policy
    }

    /// Get the coordinator for `kind`
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if no client was wired for `kind`
    pub fn toggles(&self, kind: ToggleKind) -> ServiceResult<&ToggleCoordinator> {
        self.toggles
            .get(&kind)
            .map(|coordinator| &**coordinator)
            .ok_or_else(|| ServiceError::validation(format!("no toggle client for {kind}")))
    }

    /// Shared handle to the coordinator for `kind`
    pub fn toggles_shared(&self, kind: ToggleKind) -> Option<Arc<ToggleCoordinator>> {
        self.toggles.get(&kind).cloned()
    }
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&'static str> = self.toggles.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        f.debug_struct("ServiceContext")
            .field("session", &self.session)
            .field("comment_source", &"CommentSource")
            .field("orphan_policy", &self.orphan_policy)
            .field("toggles", &kinds)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    session: Option<SharedSession>,
    comment_source: Option<Arc<dyn CommentSource>>,
    orphan_policy: OrphanPolicy,
    toggle_settings: ToggleSettings,
    toggle_clients: Vec<(ToggleKind, Arc<dyn RemoteToggleClient>)>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            session: None,
            comment_source: None,
            orphan_policy: OrphanPolicy::default(),
            toggle_settings: ToggleSettings::default(),
            toggle_clients: Vec::new(),
        }
    }

    pub fn session(mut self, session: SharedSession) -> Self {
        self.session = Some(session);
        self
    }

    pub fn comment_source(mut self, source: Arc<dyn CommentSource>) -> Self {
        self.comment_source = Some(source);
        self
    }

    pub fn orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    pub fn toggle_settings(mut self, settings: ToggleSettings) -> Self {
        self.toggle_settings = settings;
        self
    }

    /// Register the remote client for `kind`; a later call for the same kind replaces it
    pub fn toggle_client(mut self, kind: ToggleKind, client: Arc<dyn RemoteToggleClient>) -> Self {
        self.toggle_clients.retain(|(k, _)| *k != kind);
        self.toggle_clients.push((kind, client));
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let session = self
            .session
            .ok_or_else(|| ServiceError::validation("session is required"))?;
        let comment_source = self
            .comment_source
            .ok_or_else(|| ServiceError::validation("comment_source is required"))?;

        let settings = self.toggle_settings;
        let toggles = self
            .toggle_clients
            .into_iter()
            .map(|(kind, client)| (kind, ToggleCoordinator::new_shared(client, settings.clone())))
            .collect();

        Ok(ServiceContext {
            session,
            comment_source,
            orphan_policy: self.orphan_policy,
            toggles,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
