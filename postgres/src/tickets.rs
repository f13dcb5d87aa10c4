//! Ticket storage.

use chrono::{DateTime, Utc};
use litreview_core::repository::{NewTicket, TicketRepository};
use litreview_core::{DomainError, Result, Ticket, TicketId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed ticket repository.
#[derive(Clone)]
pub struct PostgresTicketStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    has_review: bool,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Self {
            id: TicketId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            user_id: UserId::from_uuid(row.user_id),
            created_at: row.created_at,
            has_review: row.has_review,
        }
    }
}

impl PostgresTicketStore {
    /// Create a new ticket store on the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TicketRepository for PostgresTicketStore {
    #[tracing::instrument(skip(self, ticket), fields(user_id = %ticket.user_id))]
    async fn create_ticket(&self, ticket: NewTicket) -> Result<Ticket> {
        let record = Ticket {
            id: TicketId::new(),
            title: ticket.title,
            description: ticket.description,
            user_id: ticket.user_id,
            created_at: Utc::now(),
            has_review: false,
        };

        sqlx::query(
            r"
            INSERT INTO tickets (id, title, description, user_id, created_at, has_review)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(record.id.as_uuid())
        .bind(&record.title)
        .bind(record.description.as_deref())
        .bind(record.user_id.as_uuid())
        .bind(record.created_at)
        .bind(record.has_review)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to create ticket: {e}")))?;

        tracing::info!(ticket_id = %record.id, "Ticket created");
        Ok(record)
    }

    async fn get_ticket(&self, ticket_id: TicketId) -> Result<Ticket> {
        let row: Option<TicketRow> = sqlx::query_as(
            r"
            SELECT id, title, description, user_id, created_at, has_review
            FROM tickets
            WHERE id = $1
            ",
        )
        .bind(ticket_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to get ticket: {e}")))?;

        row.map(Ticket::from).ok_or(DomainError::not_found("ticket"))
    }

    async fn update_ticket(
        &self,
        ticket_id: TicketId,
        title: &str,
        description: Option<&str>,
    ) -> Result<Ticket> {
        let row: Option<TicketRow> = sqlx::query_as(
            r"
            UPDATE tickets
            SET title = $2,
                description = $3
            WHERE id = $1
            RETURNING id, title, description, user_id, created_at, has_review
            ",
        )
        .bind(ticket_id.as_uuid())
        .bind(title)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to update ticket: {e}")))?;

        row.map(Ticket::from).ok_or(DomainError::not_found("ticket"))
    }

    async fn delete_ticket(&self, ticket_id: TicketId) -> Result<()> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(ticket_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Storage(format!("failed to delete ticket: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("ticket"));
        }

        tracing::info!(ticket_id = %ticket_id, "Ticket deleted");
        Ok(())
    }

    async fn set_has_review(&self, ticket_id: TicketId, has_review: bool) -> Result<()> {
        let result = sqlx::query("UPDATE tickets SET has_review = $2 WHERE id = $1")
            .bind(ticket_id.as_uuid())
            .bind(has_review)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Storage(format!("failed to flag ticket: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("ticket"));
        }

        Ok(())
    }

    async fn list_by_authors(&self, authors: &[UserId]) -> Result<Vec<Ticket>> {
        let ids: Vec<Uuid> = authors.iter().map(|id| id.0).collect();
        let rows: Vec<TicketRow> = sqlx::query_as(
            r"
            SELECT id, title, description, user_id, created_at, has_review
            FROM tickets
            WHERE user_id = ANY($1)
            ORDER BY created_at DESC
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to list tickets: {e}")))?;

        Ok(rows.into_iter().map(Ticket::from).collect())
    }
}
