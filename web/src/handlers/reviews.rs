//! Review creation and CRUD.
//!
//! Two creation flows exist, mirroring the product's two entry points:
//! responding to an existing ticket, and the "direct" flow that creates
//! the ticket and its review in one transaction.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use litreview_core::repository::{NewReview, NewTicket, ReviewRepository, TicketRepository};
use litreview_core::{DomainError, Review, ReviewId, Ticket, TicketId, validate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::SessionUser;
use crate::state::AppState;

/// Review fields common to both creation flows and edits.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    /// Rating between 0 and 5 inclusive.
    pub rating: i16,
    /// Headline, at most 128 characters.
    pub headline: String,
    /// Optional body, at most 8192 characters.
    pub body: Option<String>,
}

/// Create a review in response to an existing ticket.
///
/// Marks the ticket as reviewed.
///
/// # Errors
///
/// 404 if the ticket is missing, 422 on validation failure.
pub async fn create_review_response(
    session: SessionUser,
    Path(ticket_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    validate::validate_review(request.rating, &request.headline, request.body.as_deref())?;

    let ticket_id = TicketId::from_uuid(ticket_id);
    let ticket = state.tickets.get_ticket(ticket_id).await?;

    let review = state
        .reviews
        .create_review(NewReview {
            ticket_id: ticket.id,
            rating: request.rating,
            headline: request.headline,
            body: request.body,
            user_id: session.user_id,
        })
        .await?;

    state.tickets.set_has_review(ticket.id, true).await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// Request for the direct flow: ticket and review fields together.
#[derive(Debug, Deserialize)]
pub struct DirectReviewRequest {
    /// Title of the ticket to create.
    pub title: String,
    /// Optional ticket description.
    pub description: Option<String>,
    /// Rating between 0 and 5 inclusive.
    pub rating: i16,
    /// Review headline.
    pub headline: String,
    /// Optional review body.
    pub body: Option<String>,
}

/// Response for the direct flow.
#[derive(Debug, Serialize)]
pub struct DirectReviewResponse {
    /// The created ticket, already flagged as reviewed.
    pub ticket: Ticket,
    /// The created review.
    pub review: Review,
}

/// Create a ticket and its review in one step (review "ex nihilo").
///
/// # Errors
///
/// 422 on validation failure of either half.
pub async fn create_review_direct(
    session: SessionUser,
    State(state): State<AppState>,
    Json(request): Json<DirectReviewRequest>,
) -> Result<(StatusCode, Json<DirectReviewResponse>), AppError> {
    validate::validate_ticket(&request.title, request.description.as_deref())?;
    validate::validate_review(request.rating, &request.headline, request.body.as_deref())?;

    let (ticket, review) = state
        .reviews
        .create_review_with_ticket(
            NewTicket {
                title: request.title,
                description: request.description,
                user_id: session.user_id,
            },
            request.rating,
            request.headline,
            request.body,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DirectReviewResponse { ticket, review }),
    ))
}

/// Edit a review's rating, headline and body.
///
/// # Errors
///
/// 404 if the review is missing, 403 if the caller does not own it,
/// 422 on validation failure.
pub async fn update_review(
    session: SessionUser,
    Path(review_id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<Review>, AppError> {
    validate::validate_review(request.rating, &request.headline, request.body.as_deref())?;

    let review_id = ReviewId::from_uuid(review_id);
    let existing = state.reviews.get_review(review_id).await?;
    if existing.user_id != session.user_id {
        return Err(DomainError::Forbidden("review").into());
    }

    let review = state
        .reviews
        .update_review(
            review_id,
            request.rating,
            &request.headline,
            request.body.as_deref(),
        )
        .await?;
    Ok(Json(review))
}

/// Delete a review.
///
/// The ticket's `has_review` flag is left as-is; it records that a review
/// was attached at some point.
///
/// # Errors
///
/// 404 if the review is missing, 403 if the caller does not own it.
pub async fn delete_review(
    session: SessionUser,
    Path(review_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let review_id = ReviewId::from_uuid(review_id);
    let existing = state.reviews.get_review(review_id).await?;
    if existing.user_id != session.user_id {
        return Err(DomainError::Forbidden("review").into());
    }

    state.reviews.delete_review(review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
