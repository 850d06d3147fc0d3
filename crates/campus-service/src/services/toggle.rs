//! Optimistic toggle coordinator
//!
//! Drives likes, memberships and mutes through the per-key state machine:
//!
//! ```text
//! Idle(s) --begin--> Pending { previous: s, optimistic: flip(s) }
//! Pending --server ok--> Idle(server state)
//! Pending --failure / timeout / dropped--> Idle(previous)
//! ```
//!
//! At most one request per key is in flight; a second toggle on a pending
//! key is rejected, not queued. Different keys never contend.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, instrument, warn};

use campus_common::ToggleConfig;
use campus_core::traits::RemoteToggleClient;
use campus_core::{
    ActorId, DomainError, DomainEvent, EntityKey, RejectReason, ToggleEvent, ToggleOutcome,
    TogglePhase, ToggleState,
};

/// Coordinator tuning
#[derive(Debug, Clone)]
pub struct ToggleSettings {
    /// Give up on the remote call after this long; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Buffered events per subscriber before lagging
    pub event_capacity: usize,
}

impl Default for ToggleSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            event_capacity: 256,
        }
    }
}

impl From<&ToggleConfig> for ToggleSettings {
    fn from(config: &ToggleConfig) -> Self {
        Self {
            request_timeout: config.timeout(),
            event_capacity: config.event_capacity.max(1),
        }
    }
}

/// Owns the local toggle cache for one kind of association
pub struct ToggleCoordinator {
    client: Arc<dyn RemoteToggleClient>,
    states: DashMap<EntityKey, TogglePhase>,
    events: broadcast::Sender<DomainEvent>,
    settings: ToggleSettings,
}

impl ToggleCoordinator {
    /// Create a coordinator with default settings
    pub fn new(client: Arc<dyn RemoteToggleClient>) -> Self {
        Self::with_settings(client, ToggleSettings::default())
    }

    pub fn with_settings(client: Arc<dyn RemoteToggleClient>, settings: ToggleSettings) -> Self {
        let (events, _) = broadcast::channel(settings.event_capacity.max(1));
        Self {
            client,
            states: DashMap::new(),
            events,
            settings,
        }
    }

    /// Create a coordinator wrapped in Arc
    pub fn new_shared(client: Arc<dyn RemoteToggleClient>, settings: ToggleSettings) -> Arc<Self> {
        Arc::new(Self::with_settings(client, settings))
    }

    pub fn settings(&self) -> &ToggleSettings {
        &self.settings
    }

    /// Toggle `key` for the signed-in actor and wait for the server
    #[instrument(skip(self, key), fields(key = %key))]
    pub async fn toggle(&self, key: &EntityKey) -> ToggleOutcome {
        match self.begin(key) {
            Ok(pending) => pending.settle().await,
            Err(reason) => ToggleOutcome::Rejected(reason),
        }
    }

    /// Apply the optimistic flip and reserve the key.
    ///
    /// The returned handle must be settled; dropping it rolls the key back.
    pub fn begin(&self, key: &EntityKey) -> Result<PendingToggle<'_>, RejectReason> {
        let Some(actor) = self.client.current_actor() else {
            debug!(key = %key, "Toggle rejected: not authenticated");
            return Err(RejectReason::NotAuthenticated);
        };

        // check-and-set under the shard lock; released before any await
        let (previous, optimistic) = {
            let mut phase = self.states.entry(key.clone()).or_default();
            match *phase {
                TogglePhase::Pending { .. } => {
                    debug!(key = %key, "Toggle rejected: already pending");
                    return Err(RejectReason::AlreadyPending);
                }
                TogglePhase::Idle(previous) => {
                    let optimistic = previous.optimistic_flip();
                    *phase = TogglePhase::Pending {
                        previous,
                        optimistic,
                    };
                    (previous, optimistic)
                }
            }
        };

        debug!(
            key = %key,
            active = optimistic.active,
            count = optimistic.count,
            "Toggle started"
        );
        self.publish(DomainEvent::ToggleStarted(ToggleEvent::new(
            key.clone(),
            optimistic,
        )));

        Ok(PendingToggle {
            coordinator: self,
            key: key.clone(),
            actor,
            previous,
            optimistic,
            settled: false,
        })
    }

    /// Current phase for `key`, if it has ever been seen
    pub fn current_state(&self, key: &EntityKey) -> Option<TogglePhase> {
        self.states.get(key).map(|phase| *phase)
    }

    /// State to render for `key`; unknown keys read as inactive with zero count
    pub fn visible_state(&self, key: &EntityKey) -> ToggleState {
        self.current_state(key)
            .map(|phase| phase.visible())
            .unwrap_or_default()
    }

    pub fn is_pending(&self, key: &EntityKey) -> bool {
        self.current_state(key).is_some_and(|phase| phase.is_pending())
    }

    /// Hydrate `key` from freshly fetched data.
    ///
    /// Ignored while a toggle is in flight so stale reads never clobber it.
    pub fn seed(&self, key: EntityKey, state: ToggleState) -> bool {
        let mut phase = self.states.entry(key).or_default();
        if phase.is_pending() {
            return false;
        }
        *phase = TogglePhase::Idle(state);
        true
    }

    /// Drop an idle entry from the cache; pending entries are kept
    pub fn forget(&self, key: &EntityKey) -> bool {
        self.states
            .remove_if(key, |_, phase| !phase.is_pending())
            .is_some()
    }

    /// Number of cached keys
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Receive every state transition from now on
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }

    fn confirm(&self, key: &EntityKey, server: ToggleState) {
        self.states.insert(key.clone(), TogglePhase::Idle(server));
        debug!(
            key = %key,
            active = server.active,
            count = server.count,
            "Toggle confirmed"
        );
        self.publish(DomainEvent::ToggleConfirmed(ToggleEvent::new(
            key.clone(),
            server,
        )));
    }

    fn rollback(&self, key: &EntityKey, previous: ToggleState) {
        self.states.insert(key.clone(), TogglePhase::Idle(previous));
        self.publish(DomainEvent::ToggleRolledBack(ToggleEvent::new(
            key.clone(),
            previous,
        )));
    }

    fn publish(&self, event: DomainEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}

impl std::fmt::Debug for ToggleCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToggleCoordinator")
            .field("client", &"RemoteToggleClient")
            .field("keys", &self.states.len())
            .field("settings", &self.settings)
            .finish()
    }
}

/// A toggle whose optimistic value is visible and whose request is not yet sent
#[must_use = "dropping a pending toggle rolls it back"]
pub struct PendingToggle<'a> {
    coordinator: &'a ToggleCoordinator,
    key: EntityKey,
    actor: ActorId,
    previous: ToggleState,
    optimistic: ToggleState,
    settled: bool,
}

impl PendingToggle<'_> {
    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    pub fn actor(&self) -> &ActorId {
        &self.actor
    }

    /// Snapshot restored on failure
    pub fn previous(&self) -> ToggleState {
        self.previous
    }

    /// Value shown while the request is in flight
    pub fn optimistic(&self) -> ToggleState {
        self.optimistic
    }

    /// Send the request and reconcile: server state on success, snapshot on failure
    pub async fn settle(mut self) -> ToggleOutcome {
        let coordinator = self.coordinator;
        let request = coordinator.client.send_toggle(&self.key, &self.actor);

        let result = match coordinator.settings.request_timeout {
            Some(limit) => match tokio::time::timeout(limit, request).await {
                Ok(result) => result,
                Err(_) => Err(DomainError::ToggleTimeout {
                    millis: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }),
            },
            None => request.await,
        };

        self.settled = true;
        match result {
            Ok(server) => {
                coordinator.confirm(&self.key, server);
                ToggleOutcome::Applied(server)
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "Toggle failed, rolling back");
                coordinator.rollback(&self.key, self.previous);
                ToggleOutcome::Failed(err)
            }
        }
    }
}

impl Drop for PendingToggle<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!(key = %self.key, "Toggle abandoned before settling, rolling back");
            self.coordinator.rollback(&self.key, self.previous);
        }
    }
}
