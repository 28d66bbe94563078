use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::authentication::errors::SessionError;
use crate::domain::authentication::models::RefreshSession;
use crate::domain::authentication::ports::SessionRegistry;

/// Session registry backed by the `refresh_sessions` table, shared by every
/// instance pointed at the same database.
#[derive(Debug, Clone)]
pub struct PostgresSessionRegistry {
    pool: PgPool,
}

impl PostgresSessionRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_error(e: sqlx::Error) -> SessionError {
    SessionError::Storage(e.to_string())
}

#[async_trait]
impl SessionRegistry for PostgresSessionRegistry {
    async fn add(&self, session: RefreshSession) -> Result<(), SessionError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_sessions (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (token) DO NOTHING
            "#,
        )
        .bind(&session.token)
        .bind(session.user_id.0)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn remove(&self, token: &str) -> Result<bool, SessionError> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_sessions
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn contains(&self, token: &str) -> Result<bool, SessionError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM refresh_sessions
                WHERE token = $1 AND expires_at > $2
            )
            "#,
        )
        .bind(token)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(exists)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, SessionError> {
        let result = sqlx::query(
            r#"
            DELETE FROM refresh_sessions
            WHERE expires_at <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.rows_affected())
    }
}
