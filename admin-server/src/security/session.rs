//! In-memory session registry with concurrency control
//!
//! Sessions live in-process. Each user may hold at most `max_sessions` live
//! sessions; when the limit is hit the registry either rejects the new login
//! or expires the user's oldest session, whose next request then fails with
//! SessionExpired.

use dashmap::DashMap;
use shared::error::{AppError, ErrorCode};
use std::sync::Arc;

use crate::util::now_millis;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "ADMIN_SESSION";

/// A live (or expired-pending-cleanup) session
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i32,
    pub username: String,
    pub created_at: i64,
    pub last_seen: i64,
    /// Set when evicted by the concurrency limit; the session stays in the
    /// map until its owner comes back once, so the client sees a distinct
    /// "session expired" failure instead of a plain 401.
    pub expired: bool,
}

/// Result of a session lookup
#[derive(Debug)]
pub enum SessionLookup {
    Valid(Session),
    Expired,
    Missing,
}

/// Shared registry of console sessions
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<DashMap<String, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session for a user, enforcing the concurrency limit.
    /// Returns the new session id.
    pub fn register(
        &self,
        user_id: i32,
        username: &str,
        max_sessions: usize,
        prevents_login: bool,
    ) -> Result<String, AppError> {
        if max_sessions > 0 {
            let mut live: Vec<(String, i64)> = self
                .inner
                .iter()
                .filter(|e| e.username == username && !e.expired)
                .map(|e| (e.key().clone(), e.created_at))
                .collect();

            if live.len() >= max_sessions {
                if prevents_login {
                    return Err(AppError::new(ErrorCode::SessionLimitExceeded));
                }
                live.sort_by_key(|(_, created_at)| *created_at);
                let evict = live.len() + 1 - max_sessions;
                for (id, _) in live.into_iter().take(evict) {
                    if let Some(mut session) = self.inner.get_mut(&id) {
                        session.expired = true;
                    }
                    tracing::info!(username, session = %id, "Session evicted by concurrency limit");
                }
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = now_millis();
        self.inner.insert(
            id.clone(),
            Session {
                user_id,
                username: username.to_string(),
                created_at: now,
                last_seen: now,
                expired: false,
            },
        );
        Ok(id)
    }

    /// Look up a session by id, touching its last-seen time. An evicted
    /// session is reported once as `Expired` and then removed.
    pub fn validate(&self, id: &str) -> SessionLookup {
        let expired = match self.inner.get_mut(id) {
            None => return SessionLookup::Missing,
            Some(mut session) => {
                if session.expired {
                    true
                } else {
                    session.last_seen = now_millis();
                    return SessionLookup::Valid(session.clone());
                }
            }
        };
        debug_assert!(expired);
        self.inner.remove(id);
        SessionLookup::Expired
    }

    /// Drop a session (logout)
    pub fn invalidate(&self, id: &str) -> Option<Session> {
        self.inner.remove(id).map(|(_, session)| session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_validate() {
        let registry = SessionRegistry::new();
        let id = registry.register(1, "admin", 1, false).unwrap();
        match registry.validate(&id) {
            SessionLookup::Valid(session) => {
                assert_eq!(session.user_id, 1);
                assert_eq!(session.username, "admin");
            }
            other => panic!("expected valid session, got {other:?}"),
        }
    }

    #[test]
    fn test_oldest_session_evicted() {
        let registry = SessionRegistry::new();
        let first = registry.register(1, "admin", 1, false).unwrap();
        let second = registry.register(1, "admin", 1, false).unwrap();

        // first login got kicked, reported as expired exactly once
        assert!(matches!(registry.validate(&first), SessionLookup::Expired));
        assert!(matches!(registry.validate(&first), SessionLookup::Missing));
        assert!(matches!(registry.validate(&second), SessionLookup::Valid(_)));
    }

    #[test]
    fn test_prevents_login_rejects_new_session() {
        let registry = SessionRegistry::new();
        let first = registry.register(1, "admin", 1, true).unwrap();

        let err = registry.register(1, "admin", 1, true).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionLimitExceeded);
        // the existing session is untouched
        assert!(matches!(registry.validate(&first), SessionLookup::Valid(_)));
    }

    #[test]
    fn test_limit_is_per_user() {
        let registry = SessionRegistry::new();
        let a = registry.register(1, "alice", 1, false).unwrap();
        let _b = registry.register(2, "bob", 1, false).unwrap();
        assert!(matches!(registry.validate(&a), SessionLookup::Valid(_)));
    }

    #[test]
    fn test_invalidate() {
        let registry = SessionRegistry::new();
        let id = registry.register(1, "admin", 1, false).unwrap();
        assert!(registry.invalidate(&id).is_some());
        assert!(matches!(registry.validate(&id), SessionLookup::Missing));
    }

    #[test]
    fn test_higher_limit_keeps_both() {
        let registry = SessionRegistry::new();
        let first = registry.register(1, "admin", 2, false).unwrap();
        let second = registry.register(1, "admin", 2, false).unwrap();
        assert!(matches!(registry.validate(&first), SessionLookup::Valid(_)));
        assert!(matches!(registry.validate(&second), SessionLookup::Valid(_)));
    }
}
