use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use crate::context::Context;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub sender: String,
    pub message: String,
}

/// One web conversation: its dialogue context and transcript.
#[derive(Debug, Default)]
pub struct Session {
    pub context: Context,
    pub history: Vec<ChatLine>,
}

impl Session {
    pub fn record(&mut self, sender: &str, message: &str) {
        self.history.push(ChatLine {
            sender: sender.to_string(),
            message: message.to_string(),
        });
    }
}

pub type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

/// The map lock is only held for lookups; each session has its own async lock
/// so turns of one conversation run one at a time.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Entry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = SessionHandle::default();
        self.sessions.lock().insert(
            id,
            Entry {
                handle: handle.clone(),
                last_seen: Instant::now(),
            },
        );
        log::info!("Opened session {}", id);
        (id, handle)
    }

    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        let mut sessions = self.sessions.lock();
        let entry = sessions.get_mut(id)?;
        entry.last_seen = Instant::now();
        Some(entry.handle.clone())
    }

    /// Unknown or missing ids start a new conversation.
    pub fn get_or_open(&self, id: Option<Uuid>) -> (Uuid, SessionHandle) {
        match id.and_then(|id| self.get(&id).map(|handle| (id, handle))) {
            Some(found) => found,
            None => self.open(),
        }
    }

    pub fn close(&self, id: &Uuid) {
        if self.sessions.lock().remove(id).is_some() {
            log::info!("Closed session {}", id);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn prune_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < max_idle);
        let removed = before - sessions.len();
        if removed > 0 {
            log::debug!("Pruned {} idle sessions: {} -> {}", removed, before, sessions.len());
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sessions_keep_separate_contexts() {
        let store = SessionStore::new();
        let (a, handle_a) = store.open();
        let (b, _) = store.open();
        assert_ne!(a, b);

        handle_a.lock().await.context.unknown_count = 2;
        let handle_b = store.get(&b).unwrap();
        assert_eq!(handle_b.lock().await.context.unknown_count, 0);
        assert_eq!(store.get(&a).unwrap().lock().await.context.unknown_count, 2);
    }

    #[test]
    fn unknown_id_opens_a_new_session() {
        let store = SessionStore::new();
        let stale = Uuid::new_v4();
        let (id, _) = store.get_or_open(Some(stale));
        assert_ne!(id, stale);
        assert_eq!(store.len(), 1);

        let (same, _) = store.get_or_open(Some(id));
        assert_eq!(same, id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn close_and_prune_remove_sessions() {
        let store = SessionStore::new();
        let (id, _) = store.open();
        store.open();
        store.close(&id);
        assert_eq!(store.len(), 1);

        assert_eq!(store.prune_idle(Duration::from_secs(3600)), 0);
        assert_eq!(store.prune_idle(Duration::ZERO), 1);
        assert!(store.is_empty());
    }
}
