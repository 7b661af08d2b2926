//! Session persistence.
//!
//! The in-memory store keeps at most `max_sessions` sessions, drops sessions idle for
//! longer than the configured timeout, and on overflow evicts the least recently
//! saved session.

use async_trait::async_trait;
use ingres_core::{IgnoreLock as _, Result, Session, SessionConfig, SessionId};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Storage for per-conversant dialogue state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the session for `id`, if one is live.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    async fn load(&self, id: &SessionId) -> Result<Option<Session>>;

    /// Stores `session`, replacing any previous state for its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    async fn save(&self, session: Session) -> Result<()>;

    /// Number of live sessions.
    async fn len(&self) -> usize;

    /// Whether no session is live.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// A stored session with its activity timestamp.
#[derive(Debug, Clone)]
struct StoredSession {
    session: Session,
    last_active: Instant,
}

impl StoredSession {
    fn is_idle(&self, now: Instant, timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_active) > timeout
    }
}

/// Bounded in-memory session store.
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, StoredSession>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl InMemorySessionStore {
    /// Creates a store with the limits from `config`.
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_limits(
            config.max_sessions,
            Duration::from_secs(config.idle_timeout_secs),
        )
    }

    /// Creates a store holding at most `max_sessions` sessions idle for at most `idle_timeout`.
    pub fn with_limits(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
            idle_timeout,
        }
    }

    fn evict_idle(&self, sessions: &mut HashMap<SessionId, StoredSession>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, stored| !stored.is_idle(now, self.idle_timeout));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted idle sessions");
        }
    }

    fn evict_least_recent(sessions: &mut HashMap<SessionId, StoredSession>) {
        if let Some(oldest) = sessions
            .iter()
            .min_by_key(|(_, stored)| stored.last_active)
            .map(|(id, _)| id.clone())
        {
            tracing::debug!(session = %oldest, "Evicted least recently active session");
            sessions.remove(&oldest);
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<Session>> {
        let now = Instant::now();
        let mut sessions = self.sessions.lock_ignore_poison();
        self.evict_idle(&mut sessions, now);
        Ok(sessions.get(id).map(|stored| stored.session.clone()))
    }

    async fn save(&self, session: Session) -> Result<()> {
        let now = Instant::now();
        let mut sessions = self.sessions.lock_ignore_poison();
        self.evict_idle(&mut sessions, now);

        if !sessions.contains_key(&session.id) {
            while sessions.len() >= self.max_sessions {
                Self::evict_least_recent(&mut sessions);
            }
        }

        sessions.insert(
            session.id.clone(),
            StoredSession {
                session,
                last_active: now,
            },
        );
        Ok(())
    }

    async fn len(&self) -> usize {
        self.sessions.lock_ignore_poison().len()
    }
}
