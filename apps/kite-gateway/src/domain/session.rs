//! Session slot.
//!
//! A single brokerage session per process. The slot is replaced as a whole
//! on every write, so readers see either the previous or the next session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// An authenticated brokerage session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access_token: String,
    user_id: String,
    established_at: DateTime<Utc>,
}

impl Session {
    /// Create a session established now.
    #[must_use]
    pub fn new(access_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            user_id: user_id.into(),
            established_at: Utc::now(),
        }
    }

    /// Get the access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Get the brokerage user ID.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// When the token exchange completed.
    #[must_use]
    pub const fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("established_at", &self.established_at)
            .finish()
    }
}

/// Callback told whether the slot holds a session after each write.
type ActivityObserver = Box<dyn Fn(bool) + Send + Sync>;

/// Synchronized holder of the current session.
#[derive(Default)]
pub struct SessionStore {
    current: RwLock<Option<Arc<Session>>>,
    observer: Option<ActivityObserver>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that reports activity changes to `observer`.
    ///
    /// The observer runs while the write lock is held, so the order of
    /// notifications matches the order of writes.
    #[must_use]
    pub fn with_observer(observer: impl Fn(bool) + Send + Sync + 'static) -> Self {
        Self {
            current: RwLock::new(None),
            observer: Some(Box::new(observer)),
        }
    }

    /// Snapshot of the current session, if any.
    #[must_use]
    pub fn get(&self) -> Option<Arc<Session>> {
        self.current.read().clone()
    }

    /// Replace the current session, returning the previous one.
    #[allow(clippy::significant_drop_tightening)]
    pub fn set(&self, session: Session) -> Option<Arc<Session>> {
        let mut slot = self.current.write();
        let previous = slot.replace(Arc::new(session));
        self.notify(true);
        previous
    }

    /// Remove the current session, returning it.
    #[allow(clippy::significant_drop_tightening)]
    pub fn clear(&self) -> Option<Arc<Session>> {
        let mut slot = self.current.write();
        let removed = slot.take();
        self.notify(false);
        removed
    }

    /// Whether a session is held.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.read().is_some()
    }

    fn notify(&self, active: bool) {
        if let Some(observer) = &self.observer {
            observer(active);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &*self.current.read())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_starts_empty() {
        let store = SessionStore::new();
        assert!(store.get().is_none());
        assert!(!store.is_active());
    }

    #[test]
    fn set_overwrites_previous_session() {
        let store = SessionStore::new();
        assert!(store.set(Session::new("abc", "U1")).is_none());

        let previous = store.set(Session::new("def", "U1")).unwrap();
        assert_eq!(previous.access_token(), "abc");
        assert_eq!(store.get().unwrap().access_token(), "def");
    }

    #[test]
    fn clear_empties_slot() {
        let store = SessionStore::new();
        store.set(Session::new("abc", "U1"));

        let removed = store.clear().unwrap();
        assert_eq!(removed.user_id(), "U1");
        assert!(store.get().is_none());
        assert!(store.clear().is_none());
    }

    #[test]
    fn snapshot_survives_overwrite() {
        let store = SessionStore::new();
        store.set(Session::new("abc", "U1"));
        let snapshot = store.get().unwrap();

        store.set(Session::new("def", "U2"));
        assert_eq!(snapshot.access_token(), "abc");
        assert_eq!(store.get().unwrap().user_id(), "U2");
    }

    #[test]
    fn concurrent_writes_leave_a_whole_session() {
        let store = Arc::new(SessionStore::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store.set(Session::new(format!("token-{i}"), format!("user-{i}")));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let session = store.get().unwrap();
        let suffix = session.access_token().strip_prefix("token-").unwrap();
        assert_eq!(session.user_id(), format!("user-{suffix}"));
    }

    #[test]
    fn debug_redacts_token() {
        let session = Session::new("secret-token", "U1");
        let debug = format!("{session:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("U1"));
    }

    #[test]
    fn observer_tracks_writes_in_order() {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let store = SessionStore::with_observer(move |active| sink.lock().push(active));

        store.set(Session::new("abc", "U1"));
        store.set(Session::new("def", "U1"));
        store.clear();
        store.clear();

        assert_eq!(*seen.lock(), vec![true, true, false, false]);
    }

    #[test]
    fn observer_agrees_with_slot_under_contention() {
        let last = Arc::new(parking_lot::Mutex::new(false));
        let sink = Arc::clone(&last);
        let store = Arc::new(SessionStore::with_observer(move |active| {
            *sink.lock() = active;
        }));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for j in 0..200 {
                        if (i + j) % 3 == 0 {
                            store.clear();
                        } else {
                            store.set(Session::new(format!("tok{i}-{j}"), "U1"));
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(*last.lock(), store.is_active());
    }
}
