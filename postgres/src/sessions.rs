//! Bearer-token session storage.
//!
//! Sessions are opaque UUID tokens with a fixed time-to-live. Expired rows
//! are filtered at read time and reaped opportunistically on delete.

use chrono::{DateTime, Duration, Utc};
use litreview_core::repository::SessionRepository;
use litreview_core::{DomainError, Result, Session, SessionToken, UserId};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed session repository.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    token: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Self {
            token: SessionToken::from_uuid(row.token),
            user_id: UserId::from_uuid(row.user_id),
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

impl PostgresSessionStore {
    /// Create a new session store on the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SessionRepository for PostgresSessionStore {
    #[tracing::instrument(skip(self))]
    async fn create_session(&self, user_id: UserId, ttl: Duration) -> Result<Session> {
        let now = Utc::now();
        let session = Session {
            token: SessionToken::new(),
            user_id,
            created_at: now,
            expires_at: now + ttl,
        };

        sqlx::query(
            r"
            INSERT INTO sessions (token, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(session.token.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to create session: {e}")))?;

        Ok(session)
    }

    async fn get_session(&self, token: SessionToken) -> Result<Option<Session>> {
        let row: Option<SessionRow> = sqlx::query_as(
            r"
            SELECT token, user_id, created_at, expires_at
            FROM sessions
            WHERE token = $1 AND expires_at > now()
            ",
        )
        .bind(token.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to get session: {e}")))?;

        Ok(row.map(Session::from))
    }

    async fn delete_session(&self, token: SessionToken) -> Result<()> {
        sqlx::query(
            r"
            DELETE FROM sessions
            WHERE token = $1 OR expires_at <= now()
            ",
        )
        .bind(token.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to delete session: {e}")))?;

        Ok(())
    }
}
