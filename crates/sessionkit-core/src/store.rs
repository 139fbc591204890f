//! Session store: the single source of truth for observable auth state.
//!
//! Constructed explicitly and shared via `Arc` — one store per
//! application/request context, never a module-level singleton. Orchestrators
//! never write session data directly; every mutation goes through a fetch
//! that ends in [`SessionStore::set_session`].

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde_json::Value;
use sessionkit_types::SessionStatus;

/// Read-only projection of the store contents.
///
/// `data` is a deep clone; mutating a snapshot never reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Opaque session claims, `None` when no session exists.
    pub data: Option<Value>,
    /// Derived in lockstep with `data` and the loading flag.
    pub status: SessionStatus,
    /// Timestamp of the most recent fetch attempt (set optimistically).
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct SessionState {
    data: Option<Value>,
    loading: bool,
    last_refreshed_at: Option<DateTime<Utc>>,
}

/// Holds the current session data, loading flag, and last-refresh timestamp.
///
/// Writes are immediately visible to all readers of the shared instance.
/// Concurrent refreshes are last-writer-wins; the store does not serialize
/// them. No network access happens here.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.read();
        SessionSnapshot {
            data: state.data.clone(),
            status: SessionStatus::derive(state.loading, state.data.is_some()),
            last_refreshed_at: state.last_refreshed_at,
        }
    }

    /// Current derived status.
    pub fn status(&self) -> SessionStatus {
        let state = self.read();
        SessionStatus::derive(state.loading, state.data.is_some())
    }

    /// Marks a refresh attempt: loading until the response lands, timestamp
    /// stamped before the network call resolves.
    pub fn begin_refresh(&self) {
        let mut state = self.write();
        state.loading = true;
        state.last_refreshed_at = Some(Utc::now());
    }

    /// Replaces the session wholesale (never merges) and clears loading.
    pub fn set_session(&self, data: Option<Value>) {
        let mut state = self.write();
        state.data = data;
        state.loading = false;
    }

    /// Error path: the refresh failed, keep prior data and status.
    pub fn clear_loading(&self) {
        self.write().loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Test: status tracks data presence across writes.
    #[test]
    fn test_status_lockstep_with_data() {
        let store = SessionStore::new();
        assert_eq!(store.status(), SessionStatus::Unauthenticated);

        store.set_session(Some(json!({"user": {"id": "u1"}})));
        assert_eq!(store.status(), SessionStatus::Authenticated);

        store.set_session(None);
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
    }

    /// Test: a refresh attempt reports loading and stamps the timestamp
    /// before any response lands.
    #[test]
    fn test_begin_refresh_is_optimistic() {
        let store = SessionStore::new();
        assert!(store.snapshot().last_refreshed_at.is_none());

        store.begin_refresh();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, SessionStatus::Loading);
        assert!(snapshot.last_refreshed_at.is_some());
    }

    /// Test: a failed refresh clears loading without touching data.
    #[test]
    fn test_clear_loading_preserves_data() {
        let store = SessionStore::new();
        store.set_session(Some(json!({"user": {"id": "u1"}})));

        store.begin_refresh();
        store.clear_loading();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, SessionStatus::Authenticated);
        assert_eq!(snapshot.data, Some(json!({"user": {"id": "u1"}})));
    }

    /// Test: snapshots are projections; mutating one never reaches the store.
    #[test]
    fn test_snapshot_is_read_only_projection() {
        let store = SessionStore::new();
        store.set_session(Some(json!({"user": {"id": "u1"}})));

        let mut snapshot = store.snapshot();
        if let Some(Value::Object(map)) = snapshot.data.as_mut() {
            map.insert("user".into(), json!({"id": "tampered"}));
        }

        assert_eq!(
            store.snapshot().data,
            Some(json!({"user": {"id": "u1"}})),
            "store must be unaffected by snapshot mutation"
        );
    }
}
