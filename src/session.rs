//! Conversation session management
//!
//! One console process owns exactly one conversation at a time: an opaque
//! thread identifier plus an ordered, append-only transcript. "New
//! conversation" swaps both out atomically under a single write lock. Turns
//! are never mutated or individually removed once appended.

use crate::agent::AgentReply;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Who produced a transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The person typing into the console
    User,
    /// The remote content builder agent
    Assistant,
}

/// A single conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Turn author
    pub role: Role,

    /// Displayed text (the user's task, or the agent's reply / error text)
    pub content: String,

    /// Structured backend response, present only on successful assistant turns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AgentReply>,

    /// Creation timestamp (UTC millis)
    pub created_at: i64,
}

impl Turn {
    fn new(role: Role, content: impl Into<String>, metadata: Option<AgentReply>) -> Self {
        Self {
            role,
            content: content.into(),
            metadata,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// A conversation session: thread identifier + transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque thread identifier correlating requests with the remote
    /// agent's conversation state. Never empty, never reused across resets.
    pub id: String,

    /// Ordered transcript, oldest first
    pub transcript: Vec<Turn>,

    /// Creation timestamp (UTC millis)
    pub created_at: i64,
}

impl Session {
    /// Create a fresh session with a new thread identifier
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            transcript: Vec::new(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Most recent assistant metadata, scanning newest to oldest.
    ///
    /// Turns without metadata (user turns, failed round trips) are skipped.
    pub fn latest_metadata(&self) -> Option<&AgentReply> {
        self.transcript
            .iter()
            .rev()
            .find(|turn| turn.role == Role::Assistant && turn.metadata.is_some())
            .and_then(|turn| turn.metadata.as_ref())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared owner of the single mutable session.
///
/// Passed by reference into every handler; there is no hidden global.
#[derive(Clone)]
pub struct SessionStore {
    session: Arc<RwLock<Session>>,
}

impl SessionStore {
    /// Create the store with an initial session
    pub fn new() -> Self {
        let session = Session::new();
        tracing::info!(thread_id = %session.id, "Created conversation session");
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// Replace the session with a fresh one: new thread identifier, empty
    /// transcript, swapped together under one write lock.
    ///
    /// An in-flight agent call is not cancelled; its turns land on the new
    /// transcript when it completes. That inconsistency is accepted.
    pub async fn reset(&self) {
        let mut session = self.session.write().await;
        let old_id = std::mem::replace(&mut *session, Session::new()).id;
        tracing::info!(old = %old_id, new = %session.id, "Reset conversation");
    }

    /// Append a turn to the transcript. No cap, no compaction, no I/O.
    pub async fn append_turn(
        &self,
        role: Role,
        content: impl Into<String>,
        metadata: Option<AgentReply>,
    ) {
        let mut session = self.session.write().await;
        session.transcript.push(Turn::new(role, content, metadata));
    }

    /// Current thread identifier
    pub async fn thread_id(&self) -> String {
        self.session.read().await.id.clone()
    }

    /// Clone of the current session for rendering
    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
