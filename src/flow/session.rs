//! Per-user conversation state
//!
//! One session per user; starting a new flow replaces whatever was active.
//! Handlers receive the store as a trait object so tests can substitute their
//! own implementation.

use std::collections::HashMap;

use dashmap::DashMap;

use super::{FlowKind, Step};

/// A single user's place in an intake flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub kind: FlowKind,
    pub step: Step,
    pub fields: HashMap<&'static str, String>,
}

impl Session {
    /// Fresh session at the first step of the given flow.
    pub fn new(kind: FlowKind) -> Self {
        Self {
            kind,
            step: Step::AwaitingAccount,
            fields: HashMap::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Conversation state store keyed by user id.
///
/// Same-user concurrent updates are last-write-wins; distinct users never
/// contend beyond the backing map's shard.
pub trait SessionStore: Send + Sync {
    /// Begins a flow, discarding any session the user already had.
    fn start(&self, user_id: i64, kind: FlowKind);

    /// Snapshot of the user's session, if one is active.
    fn get(&self, user_id: i64) -> Option<Session>;

    /// Moves an active session to the given step. No-op without a session.
    fn set_step(&self, user_id: i64, step: Step);

    /// Records a collected field on an active session. No-op without a session.
    fn update_field(&self, user_id: i64, name: &'static str, value: String);

    /// Drops the user's session and every collected field.
    fn clear(&self, user_id: i64);
}

/// In-memory store backed by a sharded concurrent map.
#[derive(Debug, Default)]
pub struct InMemorySessions {
    sessions: DashMap<i64, Session>,
}

impl InMemorySessions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessions {
    fn start(&self, user_id: i64, kind: FlowKind) {
        self.sessions.insert(user_id, Session::new(kind));
    }

    fn get(&self, user_id: i64) -> Option<Session> {
        self.sessions.get(&user_id).map(|entry| entry.value().clone())
    }

    fn set_step(&self, user_id: i64, step: Step) {
        if let Some(mut entry) = self.sessions.get_mut(&user_id) {
            entry.step = step;
        }
    }

    fn update_field(&self, user_id: i64, name: &'static str, value: String) {
        if let Some(mut entry) = self.sessions.get_mut(&user_id) {
            entry.fields.insert(name, value);
        }
    }

    fn clear(&self, user_id: i64) {
        self.sessions.remove(&user_id);
    }
}
