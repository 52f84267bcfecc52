//! Session storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use super::{SessionId, SessionName, SessionSlot};

/// A complete session record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: SessionId,
    /// Namespace the session belongs to.
    pub name: SessionName,
    /// Stored values.
    #[serde(default)]
    pub values: BTreeMap<String, String>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Last time a value changed.
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create an empty session.
    pub fn new(id: SessionId, name: SessionName) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            values: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl SessionSlot for Session {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.updated_at = Utc::now();
    }
}

/// File-backed storage for the sessions of one namespace.
///
/// Each session is one JSON file. Concurrent writers are not coordinated:
/// the last save wins.
pub struct SessionStore {
    path: PathBuf,
    name: SessionName,
}

impl SessionStore {
    /// Create a store for `name` under the `root` directory.
    pub fn new(root: impl AsRef<Path>, name: SessionName) -> Self {
        Self {
            path: root.as_ref().join(name.as_str()),
            name,
        }
    }

    /// Ensure the store directory exists.
    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.path)
            .with_context(|| format!("Failed to create session store at {:?}", self.path))
    }

    /// Get the path for a session file.
    fn session_path(&self, id: &SessionId) -> PathBuf {
        self.path.join(format!("{}.json", id))
    }

    /// Resume the session `id`, or start a fresh one.
    ///
    /// An id that is unknown to the store starts a fresh session rather
    /// than failing, the same way an expired cookie would.
    pub fn start(&self, id: Option<&SessionId>) -> Result<Session> {
        if let Some(id) = id {
            if self.session_path(id).exists() {
                return self.load(id);
            }
            tracing::debug!("Session {} not found, starting a new one", id);
        }
        Ok(Session::new(SessionId::generate()?, self.name.clone()))
    }

    /// Save a session.
    pub fn save(&self, session: &Session) -> Result<()> {
        self.ensure_dir()?;
        let path = self.session_path(&session.id);
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&path, json).with_context(|| format!("Failed to write session to {:?}", path))
    }

    /// Load a session by ID.
    pub fn load(&self, id: &SessionId) -> Result<Session> {
        let path = self.session_path(id);
        let json =
            fs::read_to_string(&path).with_context(|| format!("Session not found: {:?}", path))?;
        serde_json::from_str(&json).context("Failed to parse session")
    }

    /// Whether a session is stored.
    pub fn exists(&self, id: &SessionId) -> bool {
        self.session_path(id).exists()
    }

    /// List recent sessions, most recently updated first.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<Session>> {
        self.ensure_dir()?;

        let mut sessions = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Ok(json) = fs::read_to_string(&path) {
                    if let Ok(session) = serde_json::from_str::<Session>(&json) {
                        sessions.push(session);
                    }
                }
            }
        }

        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        sessions.truncate(limit);

        Ok(sessions)
    }

    /// Remove a session. Returns whether anything was deleted.
    pub fn remove(&self, id: &SessionId) -> Result<bool> {
        let path = self.session_path(id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).with_context(|| format!("Failed to remove {:?}", path))?;
        Ok(true)
    }

    /// Clean up old sessions (keep last N).
    pub fn cleanup(&self, keep: usize) -> Result<usize> {
        let sessions = self.list_recent(usize::MAX)?;
        let mut removed = 0;

        for session in sessions.into_iter().skip(keep) {
            if self.remove(&session.id).unwrap_or(false) {
                removed += 1;
            }
        }

        Ok(removed)
    }

    /// Get the store path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the namespace.
    pub fn name(&self) -> &SessionName {
        &self.name
    }
}
