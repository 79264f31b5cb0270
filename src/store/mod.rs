//! Shared in-memory state.
//!
//! Both stores live for the life of the process and are shared by every
//! connection worker. Each one owns its own mutex and only exposes whole
//! operations, never the underlying map.

mod session;
mod user;
mod tests;

pub use session::{SessionLookup, SessionStore, MESSAGE_KEY};
pub use user::{UserId, UserStore};

/// The state handed to every request handler.
#[derive(Debug, Default)]
pub struct AppState {
    /// Session data keyed by session id.
    pub sessions: SessionStore,
    /// The user directory.
    pub users: UserStore,
}

impl AppState {
    /// Fresh state: no sessions, the two seeded users.
    pub fn new() -> Self {
        Self::default()
    }
}
