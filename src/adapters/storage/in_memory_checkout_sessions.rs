//! In-Memory Checkout Session Store
//!
//! Keeps checkout state per session in process memory. A widget session has
//! no reliable end signal (the shopper just closes the tab), so every entry
//! expires once it has been idle for the configured time-to-live. Expired
//! entries are invisible immediately and are dropped on the next insert.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::checkout::CheckoutState;
use crate::domain::foundation::CheckoutSessionId;
use crate::ports::{CheckoutSessionStore, SessionStoreError, SessionUpdate};

/// Idle time after which a session is discarded.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone)]
struct StoredSession {
    state: CheckoutState,
    last_touched: Instant,
}

impl StoredSession {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.duration_since(self.last_touched) >= ttl
    }
}

/// In-memory storage for checkout sessions
#[derive(Debug, Clone)]
pub struct InMemoryCheckoutSessions {
    sessions: Arc<RwLock<HashMap<CheckoutSessionId, StoredSession>>>,
    ttl: Duration,
}

impl Default for InMemoryCheckoutSessions {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl InMemoryCheckoutSessions {
    /// Create an empty store with the default time-to-live
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose sessions expire after `ttl` of inactivity
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Drops every expired session. Returns how many were removed.
    pub async fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| !stored.is_expired(self.ttl, now));
        let evicted = before - sessions.len();

        if evicted > 0 {
            tracing::debug!(evicted, remaining = sessions.len(), "Evicted idle checkout sessions");
        }
        evicted
    }
}

#[async_trait]
impl CheckoutSessionStore for InMemoryCheckoutSessions {
    async fn insert(
        &self,
        id: CheckoutSessionId,
        state: CheckoutState,
    ) -> Result<(), SessionStoreError> {
        self.evict_expired().await;

        self.sessions.write().await.insert(
            id,
            StoredSession {
                state,
                last_touched: Instant::now(),
            },
        );
        Ok(())
    }

    async fn update(
        &self,
        id: &CheckoutSessionId,
        update: SessionUpdate,
    ) -> Result<CheckoutState, SessionStoreError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        if sessions
            .get(id)
            .map_or(false, |stored| stored.is_expired(self.ttl, now))
        {
            sessions.remove(id);
        }

        let stored = sessions
            .get_mut(id)
            .ok_or(SessionStoreError::NotFound(*id))?;
        update(&mut stored.state);
        stored.last_touched = now;
        Ok(stored.state.clone())
    }

    async fn remove(&self, id: &CheckoutSessionId) -> Result<bool, SessionStoreError> {
        let now = Instant::now();
        Ok(self
            .sessions
            .write()
            .await
            .remove(id)
            .map_or(false, |stored| !stored.is_expired(self.ttl, now)))
    }

    async fn count(&self) -> usize {
        let now = Instant::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|stored| !stored.is_expired(self.ttl, now))
            .count()
    }
}
