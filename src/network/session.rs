//! Player Session Management
//!
//! One session per browser, keyed by a cookie-carried uuid. The session
//! context object owns the round state and the in-memory highscore copy;
//! handlers load it at entry and mutate it under its own lock, so there is
//! no ambient global game state.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::rng::SecretRng;
use crate::game::state::RoundState;
use crate::highscore::HighscoreList;

/// Unique session identifier, carried in the `sid` cookie.
pub type SessionId = Uuid;

/// Per-player server-side state.
#[derive(Debug)]
pub struct PlayerSession {
    /// Session identifier.
    pub id: SessionId,
    /// Current guessing round.
    pub round: RoundState,
    /// Session copy of the highscore list, shown on every page.
    pub highscores: HighscoreList,
    /// When the session was created.
    #[allow(dead_code)]
    created_at: Instant,
    /// Last request touching this session.
    last_seen: Instant,
}

impl PlayerSession {
    /// Create a session with a freshly seeded round.
    pub fn new(id: SessionId) -> Self {
        let created_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        let rng = SecretRng::for_session(id.as_bytes(), created_millis);

        Self {
            id,
            round: RoundState::from_rng(rng),
            highscores: HighscoreList::new(),
            created_at: Instant::now(),
            last_seen: Instant::now(),
        }
    }

    /// Record activity, for the idle cleanup sweep.
    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    /// Start a new round with a fresh secret and full bounds.
    pub fn fresh_round(&mut self) {
        self.round.reset();
    }

    /// Force a fresh round if the round state no longer brackets its
    /// secret. Returns true when a reset happened.
    pub fn repair_if_inconsistent(&mut self) -> bool {
        if self.round.is_consistent() {
            false
        } else {
            self.round.reset();
            true
        }
    }

    /// How long since the last request.
    pub fn idle_for(&self) -> Duration {
        self.last_seen.elapsed()
    }
}

// =============================================================================
// SESSION MANAGER
// =============================================================================

/// Manages all active sessions.
pub struct SessionManager {
    /// Active sessions.
    sessions: RwLock<BTreeMap<SessionId, Arc<RwLock<PlayerSession>>>>,
}

impl SessionManager {
    /// Create new session manager.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(BTreeMap::new()),
        }
    }

    /// Get a session by ID.
    pub async fn get(&self, id: &SessionId) -> Option<Arc<RwLock<PlayerSession>>> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned()
    }

    /// Create a new session with a random id.
    pub async fn create(&self) -> Arc<RwLock<PlayerSession>> {
        let id = Uuid::new_v4();
        let session = Arc::new(RwLock::new(PlayerSession::new(id)));

        let mut sessions = self.sessions.write().await;
        sessions.insert(id, session.clone());

        session
    }

    /// Resolve the request's session.
    ///
    /// A missing, unparseable or unknown cookie id gets a brand-new
    /// session rather than an error. Returns the session and whether it
    /// was just created (meaning the cookie must be set on the response).
    pub async fn get_or_create(
        &self,
        requested: Option<SessionId>,
    ) -> (Arc<RwLock<PlayerSession>>, bool) {
        if let Some(id) = requested {
            if let Some(session) = self.get(&id).await {
                return (session, false);
            }
        }
        (self.create().await, true)
    }

    /// Get active session count.
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// Remove sessions idle longer than `idle_timeout`.
    /// Returns how many were removed.
    pub async fn cleanup(&self, idle_timeout: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let mut to_remove = Vec::new();

        for (id, session) in sessions.iter() {
            let s = session.read().await;
            if s.idle_for() >= idle_timeout {
                to_remove.push(*id);
            }
        }

        let removed = to_remove.len();
        for id in to_remove {
            sessions.remove(&id);
        }
        removed
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SECRET_MAX, SECRET_MIN};

    #[tokio::test]
    async fn test_create_and_get() {
        let manager = SessionManager::new();

        let session = manager.create().await;
        let id = session.read().await.id;
        assert_eq!(manager.session_count().await, 1);

        let found = manager.get(&id).await;
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_known_id() {
        let manager = SessionManager::new();

        let session = manager.create().await;
        let id = session.read().await.id;

        let (resolved, created) = manager.get_or_create(Some(id)).await;
        assert!(!created);
        assert_eq!(resolved.read().await.id, id);
        assert_eq!(manager.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_get_or_create_unknown_id_makes_new_session() {
        let manager = SessionManager::new();

        let (_, created) = manager.get_or_create(Some(Uuid::new_v4())).await;
        assert!(created);

        let (_, created) = manager.get_or_create(None).await;
        assert!(created);

        assert_eq!(manager.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_new_session_round_is_fresh() {
        let manager = SessionManager::new();
        let session = manager.create().await;
        let session = session.read().await;

        assert_eq!(session.round.lower, SECRET_MIN);
        assert_eq!(session.round.upper, SECRET_MAX);
        assert_eq!(session.round.guesses, 0);
        assert!(session.round.is_consistent());
        assert!(session.highscores.is_empty());
    }

    #[tokio::test]
    async fn test_repair_resets_inconsistent_round() {
        let manager = SessionManager::new();
        let session = manager.create().await;
        let mut session = session.write().await;

        session.round.lower = session.round.secret + 1;
        assert!(session.repair_if_inconsistent());
        assert!(session.round.is_consistent());
        assert_eq!(session.round.guesses, 0);

        // A healthy round is left alone
        assert!(!session.repair_if_inconsistent());
    }

    #[tokio::test]
    async fn test_cleanup_removes_idle_sessions() {
        let manager = SessionManager::new();
        manager.create().await;
        manager.create().await;

        // Nothing is idle for an hour yet
        let removed = manager.cleanup(Duration::from_secs(3600)).await;
        assert_eq!(removed, 0);
        assert_eq!(manager.session_count().await, 2);

        // Zero timeout sweeps everything
        let removed = manager.cleanup(Duration::ZERO).await;
        assert_eq!(removed, 2);
        assert_eq!(manager.session_count().await, 0);
    }
}
