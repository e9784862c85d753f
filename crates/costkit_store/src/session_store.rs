//! Discovery session persistence.
//!
//! Sessions are stored under the workspace root as one JSON document each:
//! ```text
//! .costkit/sessions/
//! ├── <sessionId>.json
//! └── ...
//! ```
//!
//! A session document is the conversation snapshot plus an id and
//! timestamps. Saving always replaces the whole document.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use costkit_discovery::ConversationState;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

pub type SessionId = String;

/// A persisted discovery conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: ConversationState,
}

impl StoredSession {
    /// New session with a fresh id
    pub fn new(state: ConversationState) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), state)
    }

    pub fn with_id(id: impl Into<SessionId>, state: ConversationState) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            created_at: now,
            updated_at: now,
            state,
        }
    }

    /// Same session carrying a newer snapshot
    pub fn advanced(&self, state: ConversationState) -> Self {
        Self {
            id: self.id.clone(),
            created_at: self.created_at,
            updated_at: Utc::now(),
            state,
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            current_step: self.state.current_step,
            workflow_description: self.state.extracted.workflow_description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Listing entry for a stored session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: SessionId,
    pub current_step: usize,
    pub workflow_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage for discovery sessions keyed by id
pub trait SessionStore {
    /// Insert or replace a session
    fn save(&self, session: &StoredSession) -> StoreResult<()>;

    fn load(&self, id: &str) -> StoreResult<StoredSession>;

    /// All sessions, most recently updated first
    fn list(&self) -> StoreResult<Vec<SessionSummary>>;

    fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Session ids become file names, so only a conservative alphabet is allowed
pub fn validate_session_id(id: &str) -> StoreResult<()> {
    let valid = !id.is_empty()
        && id.len() <= 128
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidSessionId(id.to_string()))
    }
}

fn sort_recent_first(sessions: &mut [SessionSummary]) {
    sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
}

// ============================================================================
// File-backed store
// ============================================================================

/// Stores sessions as JSON files in a workspace
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    workspace_root: PathBuf,
}

impl FileSessionStore {
    pub fn new(workspace_root: impl AsRef<Path>) -> Self {
        Self {
            workspace_root: workspace_root.as_ref().to_path_buf(),
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Directory holding session documents
    pub fn sessions_dir(&self) -> PathBuf {
        self.workspace_root.join(".costkit").join("sessions")
    }

    fn session_path(&self, id: &str) -> PathBuf {
        self.sessions_dir().join(format!("{}.json", id))
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, session: &StoredSession) -> StoreResult<()> {
        validate_session_id(&session.id)?;
        let dir = self.sessions_dir();
        fs::create_dir_all(&dir)?;

        // Write then rename so readers never see a partial document
        let path = self.session_path(&session.id);
        let staging = dir.join(format!("{}.json.tmp", session.id));
        fs::write(&staging, serde_json::to_string_pretty(session)?)?;
        fs::rename(&staging, &path)?;

        debug!(session = %session.id, step = session.state.current_step, "Saved session");
        Ok(())
    }

    fn load(&self, id: &str) -> StoreResult<StoredSession> {
        validate_session_id(id)?;
        let path = self.session_path(id);
        if !path.exists() {
            return Err(StoreError::SessionNotFound(id.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn list(&self) -> StoreResult<Vec<SessionSummary>> {
        let dir = self.sessions_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut sessions = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.load(id) {
                Ok(session) => sessions.push(session.summary()),
                Err(err) => warn!(path = %path.display(), "Skipping unreadable session: {}", err),
            }
        }

        sort_recent_first(&mut sessions);
        Ok(sessions)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        validate_session_id(id)?;
        let path = self.session_path(id);
        if !path.exists() {
            return Err(StoreError::SessionNotFound(id.to_string()));
        }
        fs::remove_file(path)?;
        debug!(session = %id, "Deleted session");
        Ok(())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Captured call information for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedCall {
    pub method: String,
    pub session_id: Option<String>,
}

/// In-memory session store.
///
/// Clones share the same storage, so a test can hand one clone to a driver
/// and inspect the other. Saves can be made to fail on demand.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<Vec<StoredSession>>>,
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
    fail_saves: Arc<RwLock<Option<String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following save fail with the given message
    pub fn fail_saves(self, message: impl Into<String>) -> Self {
        *self.fail_saves.write() = Some(message.into());
        self
    }

    pub fn set_fail_saves(&self, message: Option<String>) {
        *self.fail_saves.write() = message;
    }

    pub fn captured_calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    /// Number of calls made to a method
    pub fn call_count(&self, method: &str) -> usize {
        self.captured_calls
            .read()
            .iter()
            .filter(|call| call.method == method)
            .count()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    fn capture(&self, method: &str, session_id: Option<&str>) {
        self.captured_calls.write().push(CapturedCall {
            method: method.to_string(),
            session_id: session_id.map(str::to_string),
        });
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &StoredSession) -> StoreResult<()> {
        self.capture("save", Some(&session.id));
        if let Some(message) = self.fail_saves.read().clone() {
            return Err(StoreError::Simulated(message));
        }
        validate_session_id(&session.id)?;

        let mut sessions = self.sessions.write();
        match sessions.iter_mut().find(|s| s.id == session.id) {
            Some(existing) => *existing = session.clone(),
            None => sessions.push(session.clone()),
        }
        Ok(())
    }

    fn load(&self, id: &str) -> StoreResult<StoredSession> {
        self.capture("load", Some(id));
        self.sessions
            .read()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))
    }

    fn list(&self) -> StoreResult<Vec<SessionSummary>> {
        self.capture("list", None);
        let mut sessions: Vec<_> =
            self.sessions.read().iter().map(StoredSession::summary).collect();
        sort_recent_first(&mut sessions);
        Ok(sessions)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.capture("delete", Some(id));
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            return Err(StoreError::SessionNotFound(id.to_string()));
        }
        Ok(())
    }
}
