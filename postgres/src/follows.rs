//! Follow edge storage.
//!
//! The (follower, followed) primary key is the authoritative uniqueness
//! constraint; a duplicate insert surfaces as `AlreadyExists` rather than
//! being swallowed.

use crate::map_insert_error;
use chrono::{DateTime, Utc};
use litreview_core::repository::FollowRepository;
use litreview_core::{DomainError, FollowEdge, Result, User, UserId};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed follow repository.
#[derive(Clone)]
pub struct PostgresFollowStore {
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

impl PostgresFollowStore {
    /// Create a new follow store on the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl FollowRepository for PostgresFollowStore {
    #[tracing::instrument(skip(self))]
    async fn follow(&self, follower: UserId, followed: UserId) -> Result<FollowEdge> {
        let edge = FollowEdge {
            follower_id: follower,
            followed_id: followed,
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO user_follows (follower_id, followed_id, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(edge.follower_id.as_uuid())
        .bind(edge.followed_id.as_uuid())
        .bind(edge.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(&e, "follow edge"))?;

        tracing::info!(follower = %follower, followed = %followed, "Follow edge created");
        Ok(edge)
    }

    async fn unfollow(&self, follower: UserId, followed: UserId) -> Result<()> {
        let result = sqlx::query(
            r"
            DELETE FROM user_follows
            WHERE follower_id = $1 AND followed_id = $2
            ",
        )
        .bind(follower.as_uuid())
        .bind(followed.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to unfollow: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("follow edge"));
        }

        tracing::info!(follower = %follower, followed = %followed, "Follow edge removed");
        Ok(())
    }

    async fn following_of(&self, user_id: UserId) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r"
            SELECT u.id, u.username, u.created_at
            FROM user_follows f
            JOIN users u ON u.id = f.followed_id
            WHERE f.follower_id = $1
            ORDER BY u.username
            ",
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to list following: {e}")))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn followers_of(&self, user_id: UserId) -> Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r"
            SELECT u.id, u.username, u.created_at
            FROM user_follows f
            JOIN users u ON u.id = f.follower_id
            WHERE f.followed_id = $1
            ORDER BY u.username
            ",
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to list followers: {e}")))?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn followed_ids(&self, user_id: UserId) -> Result<Vec<UserId>> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r"
            SELECT followed_id
            FROM user_follows
            WHERE follower_id = $1
            ",
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to list followed ids: {e}")))?;

        Ok(rows.into_iter().map(|(id,)| UserId::from_uuid(id)).collect())
    }
}
