//! Tests for the session and user stores.

#[cfg(test)]
mod store_tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use crate::store::{AppState, SessionLookup, SessionStore, UserStore, MESSAGE_KEY};

    #[test]
    fn test_session_lookup_does_not_create_entries() {
        let store = SessionStore::new();
        assert_eq!(store.get("abc", MESSAGE_KEY), SessionLookup::NoSession);
        assert!(!store.contains("abc"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_session_insert_creates_entry_lazily() {
        let store = SessionStore::new();
        store.insert("abc", "other", "x");
        assert!(store.contains("abc"));
        assert_eq!(store.get("abc", MESSAGE_KEY), SessionLookup::MissingKey);

        store.insert("abc", MESSAGE_KEY, "hello");
        assert_eq!(store.get("abc", MESSAGE_KEY), SessionLookup::Value("hello".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_seeded_users() {
        let users = UserStore::seeded();
        assert_eq!(users.get(1).as_deref(), Some("Alice"));
        assert_eq!(users.get(2).as_deref(), Some("Bob"));
        assert_eq!(users.get(3), None);
        assert_eq!(users.next_id(), 3);
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn test_create_is_monotonic_and_never_reuses_ids() {
        let users = UserStore::seeded();
        assert_eq!(users.create("Carol"), 3);
        assert!(users.remove(3));
        assert_eq!(users.create("Dave"), 4);
        assert_eq!(users.get(3), None);
    }

    #[test]
    fn test_create_skips_ids_taken_by_upsert() {
        let users = UserStore::seeded();
        assert!(!users.upsert(3, "Zed"));
        assert_eq!(users.create("Carol"), 4);
        assert_eq!(users.get(3).as_deref(), Some("Zed"));
    }

    #[test]
    fn test_upsert_update_remove() {
        let users = UserStore::seeded();
        assert!(users.upsert(1, "Alicia"));
        assert!(!users.upsert(10, "Ten"));
        assert_eq!(users.get(10).as_deref(), Some("Ten"));

        assert!(users.update(2, "Robert"));
        assert!(!users.update(99, "Nobody"));
        assert_eq!(users.get(99), None);

        assert!(users.remove(1));
        assert!(!users.remove(1));
    }

    #[test]
    fn test_with_users_sets_next_id() {
        let users = UserStore::with_users([(7, "Gina")]);
        assert_eq!(users.next_id(), 8);
        let empty = UserStore::with_users(Vec::<(i64, String)>::new());
        assert_eq!(empty.next_id(), 1);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_concurrent_creation_yields_distinct_sequential_ids() {
        let state = Arc::new(AppState::new());
        let handles: Vec<_> = (0..16)
            .map(|t| {
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    (0..25)
                        .map(|i| state.users.create(format!("user-{t}-{i}")))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let unique: HashSet<i64> = ids.iter().copied().collect();

        assert_eq!(ids.len(), 400);
        assert_eq!(unique.len(), 400);
        assert_eq!(unique, (3..403).collect::<HashSet<i64>>());
        assert_eq!(state.users.len(), 402);
    }
}
