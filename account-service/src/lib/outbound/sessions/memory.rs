use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::authentication::errors::SessionError;
use crate::domain::authentication::models::RefreshSession;
use crate::domain::authentication::ports::SessionRegistry;

/// Process-local session registry.
///
/// Suitable for a single instance and for tests. Entries do not survive a
/// restart, so every outstanding refresh token is invalidated by one.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRegistry {
    /// Map of refresh token -> session
    sessions: Arc<RwLock<HashMap<String, RefreshSession>>>,
}

impl InMemorySessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn add(&self, session: RefreshSession) -> Result<(), SessionError> {
        self.sessions
            .write()
            .await
            .entry(session.token.clone())
            .or_insert(session);

        Ok(())
    }

    async fn remove(&self, token: &str) -> Result<bool, SessionError> {
        Ok(self.sessions.write().await.remove(token).is_some())
    }

    async fn contains(&self, token: &str) -> Result<bool, SessionError> {
        let now = Utc::now();

        Ok(self
            .sessions
            .read()
            .await
            .get(token)
            .is_some_and(|session| !session.is_expired(now)))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));

        Ok((before - sessions.len()) as u64)
    }
}
