//! User account storage.

use crate::map_insert_error;
use chrono::{DateTime, Utc};
use litreview_core::repository::UserRepository;
use litreview_core::{DomainError, Result, User, UserId};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed user repository.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            username: row.username,
            created_at: row.created_at,
        }
    }
}

impl PostgresUserStore {
    /// Create a new user store on the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PostgresUserStore {
    #[tracing::instrument(skip(self, password_digest))]
    async fn create_user(&self, username: &str, password_digest: &str) -> Result<User> {
        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO users (id, username, password_digest, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(password_digest)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(&e, "username"))?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    async fn get_user(&self, user_id: UserId) -> Result<User> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT id, username, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to get user: {e}")))?;

        row.map(User::from).ok_or(DomainError::not_found("user"))
    }

    async fn find_with_digest(&self, username: &str) -> Result<Option<(User, String)>> {
        let row: Option<(Uuid, String, String, DateTime<Utc>)> = sqlx::query_as(
            r"
            SELECT id, username, password_digest, created_at
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to look up credentials: {e}")))?;

        Ok(row.map(|(id, username, digest, created_at)| {
            (
                User {
                    id: UserId::from_uuid(id),
                    username,
                    created_at,
                },
                digest,
            )
        }))
    }

    async fn search_by_username(&self, username: &str) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r"
            SELECT id, username, created_at
            FROM users
            WHERE lower(username) = lower($1)
            ",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to search users: {e}")))?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}
