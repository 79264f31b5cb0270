//! The user directory: integer ids mapped to names.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A user identifier as it appears in `/users/{id}`.
pub type UserId = i64;

#[derive(Debug)]
struct Users {
    names: HashMap<UserId, String>,
    next_id: UserId,
}

/// In-memory user store, seeded with Alice and Bob.
///
/// The name map and the id counter sit behind one mutex, so allocating an id
/// and inserting the user happen as a single step.
#[derive(Debug)]
pub struct UserStore {
    inner: Mutex<Users>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl UserStore {
    /// A store holding `{1: "Alice", 2: "Bob"}` with the next id set to 3.
    pub fn seeded() -> Self {
        Self::with_users([(1, "Alice"), (2, "Bob")])
    }

    /// A store holding exactly `users`; the next id follows the largest seeded id.
    pub fn with_users<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = (UserId, S)>,
        S: Into<String>,
    {
        let names: HashMap<UserId, String> = users
            .into_iter()
            .map(|(id, name)| (id, name.into()))
            .collect();
        let next_id = names.keys().copied().max().unwrap_or(0).max(0) + 1;

        Self {
            inner: Mutex::new(Users { names, next_id }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Users> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a user's name.
    pub fn get(&self, id: UserId) -> Option<String> {
        self.lock().names.get(&id).cloned()
    }

    /// Allocate the next id and store `name` under it.
    ///
    /// Ids are never reused, even after deletion. An id already taken by a
    /// `PUT` is skipped rather than overwritten.
    pub fn create(&self, name: impl Into<String>) -> UserId {
        let mut users = self.lock();
        while users.names.contains_key(&users.next_id) {
            users.next_id += 1;
        }
        let id = users.next_id;
        users.next_id += 1;
        users.names.insert(id, name.into());
        id
    }

    /// Set `users[id] = name` unconditionally.
    ///
    /// Returns `true` if the id existed before the write.
    pub fn upsert(&self, id: UserId, name: impl Into<String>) -> bool {
        self.lock().names.insert(id, name.into()).is_some()
    }

    /// Replace the name of an existing user. Unknown ids are left alone.
    ///
    /// Returns `true` if the user existed and was updated.
    pub fn update(&self, id: UserId, name: impl Into<String>) -> bool {
        match self.lock().names.get_mut(&id) {
            Some(existing) => {
                *existing = name.into();
                true
            }
            None => false,
        }
    }

    /// Remove a user. Returns `true` if the id was present.
    pub fn remove(&self, id: UserId) -> bool {
        self.lock().names.remove(&id).is_some()
    }

    /// The id the next successful creation will receive.
    pub fn next_id(&self) -> UserId {
        self.lock().next_id
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.lock().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
