//! Test fixtures and in-memory ports
//!
//! Provides comment record builders and fakes of the remote toggle client and
//! comment source.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::json;
use tokio::sync::Semaphore;

use campus_core::traits::{CommentSource, RemoteToggleClient};
use campus_core::{ActorId, CommentRecord, DomainError, EntityKey, RepoResult, ToggleState};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A key no other test uses
pub fn unique_key(prefix: &str) -> EntityKey {
    EntityKey::new(format!("{prefix}-{}", unique_suffix()))
}

/// Top-level comment
pub fn root(id: &str, created_at: &str) -> CommentRecord {
    CommentRecord::new(id, created_at, payload(id))
}

/// Reply to `parent`
pub fn reply(id: &str, parent: &str, created_at: &str) -> CommentRecord {
    CommentRecord::reply(id, parent, created_at, payload(id))
}

fn payload(id: &str) -> serde_json::Value {
    json!({
        "author_id": "author-1",
        "content": format!("comment {id}"),
        "reactions": {},
    })
}

/// Remote toggle client driven by a script.
///
/// Each call pops the next scripted reply. Once the script is exhausted the
/// client acts as a well-behaved server that flips its own per-key state.
/// With a gate installed every call waits for a permit first.
pub struct ScriptedToggleClient {
    actor: RwLock<Option<ActorId>>,
    script: Mutex<VecDeque<RepoResult<ToggleState>>>,
    server: Mutex<HashMap<EntityKey, ToggleState>>,
    gate: Option<Arc<Semaphore>>,
    calls: Mutex<Vec<(EntityKey, ActorId)>>,
}

impl ScriptedToggleClient {
    /// Signed in as `actor`, nothing scripted
    pub fn signed_in(actor: &str) -> Self {
        Self {
            actor: RwLock::new(Some(ActorId::new(actor))),
            script: Mutex::new(VecDeque::new()),
            server: Mutex::new(HashMap::new()),
            gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// No signed-in actor
    pub fn anonymous() -> Self {
        let client = Self::signed_in("nobody");
        client.sign_out();
        client
    }

    /// Queue replies in order
    pub fn with_script(self, replies: impl IntoIterator<Item = RepoResult<ToggleState>>) -> Self {
        self.script.lock().extend(replies);
        self
    }

    /// Seed the fallback server state for `key`
    pub fn with_server_state(self, key: &EntityKey, state: ToggleState) -> Self {
        self.server.lock().insert(key.clone(), state);
        self
    }

    /// Hold every call until [`Self::release`] hands out a permit
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Let `n` held calls proceed
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn sign_out(&self) {
        *self.actor.write() = None;
    }

    /// Keys sent so far, in call order
    pub fn calls(&self) -> Vec<(EntityKey, ActorId)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl RemoteToggleClient for ScriptedToggleClient {
    fn current_actor(&self) -> Option<ActorId> {
        self.actor.read().clone()
    }

    async fn send_toggle(&self, key: &EntityKey, actor: &ActorId) -> RepoResult<ToggleState> {
        self.calls.lock().push((key.clone(), actor.clone()));

        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| DomainError::Remote(e.to_string()))?;
            permit.forget();
        }

        if let Some(reply) = self.script.lock().pop_front() {
            return reply;
        }

        let mut server = self.server.lock();
        let state = server.entry(key.clone()).or_default();
        *state = state.optimistic_flip();
        Ok(*state)
    }
}

/// Comment source serving fixed lists per context
#[derive(Default)]
pub struct StaticCommentSource {
    threads: HashMap<String, Vec<CommentRecord>>,
    failure: Option<DomainError>,
}

impl StaticCommentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thread(mut self, context: &str, records: Vec<CommentRecord>) -> Self {
        self.threads.insert(context.to_string(), records);
        self
    }

    /// Fail every fetch with `error`
    pub fn failing(error: DomainError) -> Self {
        Self {
            threads: HashMap::new(),
            failure: Some(error),
        }
    }
}

#[async_trait]
impl CommentSource for StaticCommentSource {
    async fn comments_for(&self, context: &str) -> RepoResult<Vec<CommentRecord>> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.threads.get(context).cloned().unwrap_or_default())
    }
}
