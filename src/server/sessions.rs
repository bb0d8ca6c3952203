//! Signed-in sessions by id. The cookie only carries the id; tokens never leave the server.

use crate::session::Session;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub type SessionId = Uuid;

/// Per-session entry: the signed-in session + last activity time (for auto-cleanup).
struct SessionEntry {
    session: Session,
    last_activity: Instant,
}

/// In-memory sessions. Changes are applied in place under the lock, so a handler
/// that awaited the remote API never resurrects a session that ended meanwhile.
#[derive(Default)]
pub struct SessionStore {
    entries: RwLock<HashMap<SessionId, SessionEntry>>,
}

impl SessionStore {
    fn entries(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, SessionEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new session under a fresh id.
    pub fn open(&self, session: Session) -> SessionId {
        let id = Uuid::new_v4();
        self.entries().insert(
            id,
            SessionEntry {
                session,
                last_activity: Instant::now(),
            },
        );
        id
    }

    /// Copy of a live session; refreshes its activity time.
    pub fn touch(&self, id: &SessionId) -> Option<Session> {
        let mut entries = self.entries();
        let entry = entries.get_mut(id)?;
        entry.last_activity = Instant::now();
        Some(entry.session.clone())
    }

    /// Change a live session in place. `None` when it no longer exists.
    pub fn modify<R>(&self, id: &SessionId, change: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut entries = self.entries();
        let entry = entries.get_mut(id)?;
        entry.last_activity = Instant::now();
        Some(change(&mut entry.session))
    }

    pub fn remove(&self, id: &SessionId) -> Option<Session> {
        self.entries().remove(id).map(|e| e.session)
    }

    /// Remove and return the sessions idle for at least `timeout` as of `now`.
    pub fn evict_idle(&self, timeout: Duration, now: Instant) -> Vec<Session> {
        let mut entries = self.entries();
        let idle: Vec<SessionId> = entries
            .iter()
            .filter(|(_, e)| now.saturating_duration_since(e.last_activity) >= timeout)
            .map(|(id, _)| *id)
            .collect();
        idle.iter()
            .filter_map(|id| entries.remove(id))
            .map(|e| e.session)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
