//! Review storage.
//!
//! Besides plain CRUD, this store owns the "direct review" flow: creating
//! a ticket and its review atomically in one transaction, with the
//! ticket's `has_review` flag already set.

use chrono::{DateTime, Utc};
use litreview_core::repository::{NewReview, NewTicket, ReviewRepository};
use litreview_core::{DomainError, Result, Review, ReviewId, Ticket, TicketId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed review repository.
#[derive(Clone)]
pub struct PostgresReviewStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: Uuid,
    ticket_id: Uuid,
    rating: i16,
    headline: String,
    body: Option<String>,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: ReviewId::from_uuid(row.id),
            ticket_id: TicketId::from_uuid(row.ticket_id),
            rating: row.rating,
            headline: row.headline,
            body: row.body,
            user_id: UserId::from_uuid(row.user_id),
            created_at: row.created_at,
        }
    }
}

impl PostgresReviewStore {
    /// Create a new review store on the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_review_insert_error(e: &sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = e {
        if db_err.is_foreign_key_violation() {
            return DomainError::not_found("ticket");
        }
    }
    DomainError::Storage(format!("failed to create review: {e}"))
}

impl ReviewRepository for PostgresReviewStore {
    #[tracing::instrument(skip(self, review), fields(ticket_id = %review.ticket_id, user_id = %review.user_id))]
    async fn create_review(&self, review: NewReview) -> Result<Review> {
        let record = Review {
            id: ReviewId::new(),
            ticket_id: review.ticket_id,
            rating: review.rating,
            headline: review.headline,
            body: review.body,
            user_id: review.user_id,
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO reviews (id, ticket_id, rating, headline, body, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(record.id.as_uuid())
        .bind(record.ticket_id.as_uuid())
        .bind(record.rating)
        .bind(&record.headline)
        .bind(record.body.as_deref())
        .bind(record.user_id.as_uuid())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_review_insert_error(&e))?;

        tracing::info!(review_id = %record.id, "Review created");
        Ok(record)
    }

    #[tracing::instrument(skip_all, fields(user_id = %ticket.user_id))]
    async fn create_review_with_ticket(
        &self,
        ticket: NewTicket,
        rating: i16,
        headline: String,
        body: Option<String>,
    ) -> Result<(Ticket, Review)> {
        let now = Utc::now();
        let ticket_record = Ticket {
            id: TicketId::new(),
            title: ticket.title,
            description: ticket.description,
            user_id: ticket.user_id,
            created_at: now,
            has_review: true,
        };
        let review_record = Review {
            id: ReviewId::new(),
            ticket_id: ticket_record.id,
            rating,
            headline,
            body,
            user_id: ticket.user_id,
            created_at: now,
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::Storage(format!("failed to start transaction: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO tickets (id, title, description, user_id, created_at, has_review)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(ticket_record.id.as_uuid())
        .bind(&ticket_record.title)
        .bind(ticket_record.description.as_deref())
        .bind(ticket_record.user_id.as_uuid())
        .bind(ticket_record.created_at)
        .bind(ticket_record.has_review)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to create ticket: {e}")))?;

        sqlx::query(
            r"
            INSERT INTO reviews (id, ticket_id, rating, headline, body, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(review_record.id.as_uuid())
        .bind(review_record.ticket_id.as_uuid())
        .bind(review_record.rating)
        .bind(&review_record.headline)
        .bind(review_record.body.as_deref())
        .bind(review_record.user_id.as_uuid())
        .bind(review_record.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to create review: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::Storage(format!("failed to commit transaction: {e}")))?;

        tracing::info!(
            ticket_id = %ticket_record.id,
            review_id = %review_record.id,
            "Direct review created"
        );
        Ok((ticket_record, review_record))
    }

    async fn get_review(&self, review_id: ReviewId) -> Result<Review> {
        let row: Option<ReviewRow> = sqlx::query_as(
            r"
            SELECT id, ticket_id, rating, headline, body, user_id, created_at
            FROM reviews
            WHERE id = $1
            ",
        )
        .bind(review_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to get review: {e}")))?;

        row.map(Review::from).ok_or(DomainError::not_found("review"))
    }

    async fn update_review(
        &self,
        review_id: ReviewId,
        rating: i16,
        headline: &str,
        body: Option<&str>,
    ) -> Result<Review> {
        let row: Option<ReviewRow> = sqlx::query_as(
            r"
            UPDATE reviews
            SET rating = $2,
                headline = $3,
                body = $4
            WHERE id = $1
            RETURNING id, ticket_id, rating, headline, body, user_id, created_at
            ",
        )
        .bind(review_id.as_uuid())
        .bind(rating)
        .bind(headline)
        .bind(body)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to update review: {e}")))?;

        row.map(Review::from).ok_or(DomainError::not_found("review"))
    }

    async fn delete_review(&self, review_id: ReviewId) -> Result<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Storage(format!("failed to delete review: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("review"));
        }

        tracing::info!(review_id = %review_id, "Review deleted");
        Ok(())
    }

    async fn list_by_authors(&self, authors: &[UserId]) -> Result<Vec<Review>> {
        let ids: Vec<Uuid> = authors.iter().map(|id| id.0).collect();
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r"
            SELECT id, ticket_id, rating, headline, body, user_id, created_at
            FROM reviews
            WHERE user_id = ANY($1)
            ORDER BY created_at DESC
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to list reviews: {e}")))?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    async fn list_responding_to(&self, ticket_author: UserId) -> Result<Vec<Review>> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r"
            SELECT r.id, r.ticket_id, r.rating, r.headline, r.body, r.user_id, r.created_at
            FROM reviews r
            JOIN tickets t ON t.id = r.ticket_id
            WHERE t.user_id = $1
            ORDER BY r.created_at DESC
            ",
        )
        .bind(ticket_author.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to list responding reviews: {e}")))?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}
