//! Per-client session data keyed by session identifier.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The key under which `/store-data` keeps its payload.
pub const MESSAGE_KEY: &str = "message";

/// Outcome of reading one key from a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    /// No entry exists for the session id.
    NoSession,
    /// The session exists but the key was never written.
    MissingKey,
    /// The stored value.
    Value(String),
}

/// In-memory session store.
///
/// Entries are created on first write and never expire.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, HashMap<String, String>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read `key` from the session `id` without creating anything.
    pub fn get(&self, id: &str, key: &str) -> SessionLookup {
        match self.lock().get(id) {
            None => SessionLookup::NoSession,
            Some(data) => data
                .get(key)
                .cloned()
                .map_or(SessionLookup::MissingKey, SessionLookup::Value),
        }
    }

    /// Store `value` under `key`, creating the session entry if absent.
    pub fn insert(&self, id: &str, key: impl Into<String>, value: impl Into<String>) {
        self.lock()
            .entry(id.to_string())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Check whether a session entry exists.
    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
