use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use super::InMemorySessionRegistry;
use super::PostgresSessionRegistry;
use crate::domain::authentication::errors::SessionError;
use crate::domain::authentication::models::RefreshSession;
use crate::domain::authentication::ports::SessionRegistry;

/// Session registry chosen at startup from `session.store`.
#[derive(Debug, Clone)]
pub enum SessionStore {
    Memory(InMemorySessionRegistry),
    Postgres(PostgresSessionRegistry),
}

#[async_trait]
impl SessionRegistry for SessionStore {
    async fn add(&self, session: RefreshSession) -> Result<(), SessionError> {
        match self {
            SessionStore::Memory(registry) => registry.add(session).await,
            SessionStore::Postgres(registry) => registry.add(session).await,
        }
    }

    async fn remove(&self, token: &str) -> Result<bool, SessionError> {
        match self {
            SessionStore::Memory(registry) => registry.remove(token).await,
            SessionStore::Postgres(registry) => registry.remove(token).await,
        }
    }

    async fn contains(&self, token: &str) -> Result<bool, SessionError> {
        match self {
            SessionStore::Memory(registry) => registry.contains(token).await,
            SessionStore::Postgres(registry) => registry.contains(token).await,
        }
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionError> {
        match self {
            SessionStore::Memory(registry) => registry.purge_expired(now).await,
            SessionStore::Postgres(registry) => registry.purge_expired(now).await,
        }
    }
}
