//! Holds the generation state of every open session.
//!
//! Each session id maps to its own `DeploymentSession`; nothing is shared
//! between entries. `SessionsState` is cloned into every Actix worker as
//! `web::Data`, the map behind it is the single copy.
//!
//! Entries record when they were last used. Idle entries are dropped once
//! they exceed the configured TTL, both by the periodic sweep started in
//! `main.rs` and whenever a new session is opened. Opening beyond
//! `max_sessions` discards the least recently used entry.

use crate::config::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL};
use common::session::DeploymentSession;
use std::time::{Duration, Instant};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

struct SessionEntry {
    session: DeploymentSession,
    last_touched: Instant,
}

impl SessionEntry {
    fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_touched) > ttl
    }
}

#[derive(Clone)]
pub struct SessionsState {
    /// Session id (UUID v4) to that session's state.
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionsState {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionsState {
    pub fn new(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Registers a fresh session awaiting input and returns its id.
    pub async fn open(&self) -> String {
        self.open_at(Instant::now()).await
    }

    async fn open_at(&self, now: Instant) -> String {
        let mut sessions = self.sessions.write().await;
        let ttl = self.idle_ttl;
        sessions.retain(|_, entry| !entry.is_idle(now, ttl));

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_touched)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }

        let session_id = Uuid::new_v4().to_string();
        sessions.insert(
            session_id.clone(),
            SessionEntry {
                session: DeploymentSession::new(),
                last_touched: now,
            },
        );
        session_id
    }

    /// Runs `f` on a live session and marks it as used. Returns `None` for
    /// unknown ids and for sessions that already went idle.
    pub async fn with_session<R, F>(&self, session_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut DeploymentSession) -> R,
    {
        self.with_session_at(session_id, Instant::now(), f).await
    }

    async fn with_session_at<R, F>(&self, session_id: &str, now: Instant, f: F) -> Option<R>
    where
        F: FnOnce(&mut DeploymentSession) -> R,
    {
        let mut sessions = self.sessions.write().await;
        if sessions.get(session_id)?.is_idle(now, self.idle_ttl) {
            sessions.remove(session_id);
            return None;
        }
        let entry = sessions.get_mut(session_id)?;
        entry.last_touched = now;
        Some(f(&mut entry.session))
    }

    /// Drops a session. Returns `false` if the id was unknown.
    pub async fn close(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    /// Drops every session idle for longer than the TTL; returns how many went.
    pub async fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now()).await
    }

    async fn evict_idle_at(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        let ttl = self.idle_ttl;
        sessions.retain(|_, entry| !entry.is_idle(now, ttl));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::session::SessionPhase;

    const TTL: Duration = Duration::from_secs(60);

    #[actix_web::test]
    async fn open_and_close() {
        let state = SessionsState::default();
        let first = state.open().await;
        let second = state.open().await;
        assert_ne!(first, second);
        assert_eq!(
            state.with_session(&first, |s| s.phase()).await,
            Some(SessionPhase::AwaitingInput)
        );

        assert!(state.close(&first).await);
        assert!(!state.close(&first).await);
        assert!(state.with_session(&first, |_| ()).await.is_none());
        assert!(state.with_session(&second, |_| ()).await.is_some());
    }

    #[actix_web::test]
    async fn idle_session_is_evicted() {
        let state = SessionsState::new(TTL, 100);
        let start = Instant::now();
        let idle = state.open_at(start).await;
        let active = state.open_at(start).await;

        let later = start + Duration::from_secs(45);
        assert!(state.with_session_at(&active, later, |_| ()).await.is_some());

        let evicted = state.evict_idle_at(start + Duration::from_secs(90)).await;
        assert_eq!(evicted, 1);
        assert_eq!(state.len().await, 1);
        assert!(state.close(&active).await);
        assert!(!state.close(&idle).await);
    }

    #[actix_web::test]
    async fn abandoned_sessions_do_not_accumulate() {
        let state = SessionsState::new(TTL, 10_000);
        let start = Instant::now();
        for _ in 0..1_000 {
            state.open_at(start).await;
        }
        assert_eq!(state.len().await, 1_000);

        state.open_at(start + Duration::from_secs(61)).await;
        assert_eq!(state.len().await, 1);
    }

    #[actix_web::test]
    async fn expired_session_is_not_found() {
        let state = SessionsState::new(TTL, 10);
        let start = Instant::now();
        let id = state.open_at(start).await;
        let expired = start + Duration::from_secs(61);
        assert!(state.with_session_at(&id, expired, |_| ()).await.is_none());
        assert_eq!(state.len().await, 0);
    }

    #[actix_web::test]
    async fn cap_discards_least_recently_used() {
        let state = SessionsState::new(TTL, 2);
        let start = Instant::now();
        let first = state.open_at(start).await;
        let second = state.open_at(start + Duration::from_secs(1)).await;
        state
            .with_session_at(&first, start + Duration::from_secs(2), |_| ())
            .await;

        let third = state.open_at(start + Duration::from_secs(3)).await;
        assert_eq!(state.len().await, 2);
        assert!(!state.close(&second).await);
        assert!(state.close(&first).await);
        assert!(state.close(&third).await);
    }
}
