//! Ticket CRUD.
//!
//! Edits and deletes verify ownership: only the ticket's author may
//! mutate it.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use litreview_core::repository::{NewTicket, TicketRepository};
use litreview_core::{DomainError, Ticket, TicketId, validate};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::SessionUser;
use crate::state::AppState;

/// Request to create or edit a ticket.
#[derive(Debug, Deserialize)]
pub struct TicketRequest {
    /// Ticket title, at most 128 characters.
    pub title: String,
    /// Optional description, at most 2048 characters.
    pub description: Option<String>,
}

/// Create a ticket owned by the caller.
///
/// # Errors
///
/// 422 on validation failure.
pub async fn create_ticket(
    session: SessionUser,
    State(state): State<AppState>,
    Json(request): Json<TicketRequest>,
) -> Result<(StatusCode, Json<Ticket>), AppError> {
    validate::validate_ticket(&request.title, request.description.as_deref())?;

    let ticket = state
        .tickets
        .create_ticket(NewTicket {
            title: request.title,
            description: request.description,
            user_id: session.user_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Edit a ticket's title and description.
///
/// # Errors
///
/// 404 if the ticket is missing, 403 if the caller does not own it,
/// 422 on validation failure.
pub async fn update_ticket(
    session: SessionUser,
    Path(ticket_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<TicketRequest>,
) -> Result<Json<Ticket>, AppError> {
    validate::validate_ticket(&request.title, request.description.as_deref())?;

    let ticket_id = TicketId::from_uuid(ticket_id);
    let existing = state.tickets.get_ticket(ticket_id).await?;
    if existing.user_id != session.user_id {
        return Err(DomainError::Forbidden("ticket").into());
    }

    let ticket = state
        .tickets
        .update_ticket(ticket_id, &request.title, request.description.as_deref())
        .await?;
    Ok(Json(ticket))
}

/// Delete a ticket; its reviews are removed with it.
///
/// # Errors
///
/// 404 if the ticket is missing, 403 if the caller does not own it.
pub async fn delete_ticket(
    session: SessionUser,
    Path(ticket_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let ticket_id = TicketId::from_uuid(ticket_id);
    let existing = state.tickets.get_ticket(ticket_id).await?;
    if existing.user_id != session.user_id {
        return Err(DomainError::Forbidden("ticket").into());
    }

    state.tickets.delete_ticket(ticket_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
