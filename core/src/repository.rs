//! Repository traits specifying the persistence seam.
//!
//! `litreview-postgres` provides the PostgreSQL implementations. Handlers
//! depend on these traits so the storage backend stays swappable in tests.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::types::{
    FollowEdge, Review, ReviewId, Session, SessionToken, Ticket, TicketId, User, UserId,
};
use chrono::Duration;

/// New ticket fields, validated before they reach the repository.
#[derive(Debug, Clone)]
pub struct NewTicket {
    /// Ticket title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning user.
    pub user_id: UserId,
}

/// New review fields, validated before they reach the repository.
#[derive(Debug, Clone)]
pub struct NewReview {
    /// Ticket the review responds to.
    pub ticket_id: TicketId,
    /// Rating in `[0, 5]`.
    pub rating: i16,
    /// Headline.
    pub headline: String,
    /// Optional body.
    pub body: Option<String>,
    /// Authoring user.
    pub user_id: UserId,
}

/// Storage for user accounts and credentials.
pub trait UserRepository {
    /// Create a user with the given password digest.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::AlreadyExists`] if the username is taken.
    async fn create_user(&self, username: &str, password_digest: &str) -> Result<User>;

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::NotFound`] if no such user exists.
    async fn get_user(&self, user_id: UserId) -> Result<User>;

    /// Fetch a user and their stored password digest by exact username.
    ///
    /// Returns `None` rather than an error so login can fail uniformly
    /// without revealing whether the username exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] on database failure.
    async fn find_with_digest(&self, username: &str) -> Result<Option<(User, String)>>;

    /// Case-insensitive exact username search (the follow-someone flow).
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] on database failure.
    async fn search_by_username(&self, username: &str) -> Result<Vec<User>>;
}

/// Storage for bearer-token sessions.
pub trait SessionRepository {
    /// Mint a session for the user with the given time-to-live.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] on database failure.
    async fn create_session(&self, user_id: UserId, ttl: Duration) -> Result<Session>;

    /// Look up a session by token; expired sessions are reported as absent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] on database failure.
    async fn get_session(&self, token: SessionToken) -> Result<Option<Session>>;

    /// Revoke a session. Revoking an unknown token is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] on database failure.
    async fn delete_session(&self, token: SessionToken) -> Result<()>;
}

/// Storage for tickets.
pub trait TicketRepository {
    /// Persist a new ticket.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] on database failure.
    async fn create_ticket(&self, ticket: NewTicket) -> Result<Ticket>;

    /// Look up a ticket by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::NotFound`] if no such ticket exists.
    async fn get_ticket(&self, ticket_id: TicketId) -> Result<Ticket>;

    /// Update a ticket's title and description.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::NotFound`] if no such ticket exists.
    async fn update_ticket(
        &self,
        ticket_id: TicketId,
        title: &str,
        description: Option<&str>,
    ) -> Result<Ticket>;

    /// Delete a ticket; its reviews go with it (cascade).
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::NotFound`] if no such ticket exists.
    async fn delete_ticket(&self, ticket_id: TicketId) -> Result<()>;

    /// Mark a ticket as having received a review.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::NotFound`] if no such ticket exists.
    async fn set_has_review(&self, ticket_id: TicketId, has_review: bool) -> Result<()>;

    /// All tickets authored by any of the given users, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] on database failure.
    async fn list_by_authors(&self, authors: &[UserId]) -> Result<Vec<Ticket>>;
}

/// Storage for reviews.
pub trait ReviewRepository {
    /// Persist a new review against an existing ticket.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::NotFound`] if the ticket is missing.
    async fn create_review(&self, review: NewReview) -> Result<Review>;

    /// Create a ticket and its review atomically (the "direct review" flow).
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] if the transaction fails.
    async fn create_review_with_ticket(
        &self,
        ticket: NewTicket,
        rating: i16,
        headline: String,
        body: Option<String>,
    ) -> Result<(Ticket, Review)>;

    /// Look up a review by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::NotFound`] if no such review exists.
    async fn get_review(&self, review_id: ReviewId) -> Result<Review>;

    /// Update a review's rating, headline and body.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::NotFound`] if no such review exists.
    async fn update_review(
        &self,
        review_id: ReviewId,
        rating: i16,
        headline: &str,
        body: Option<&str>,
    ) -> Result<Review>;

    /// Delete a review.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::NotFound`] if no such review exists.
    async fn delete_review(&self, review_id: ReviewId) -> Result<()>;

    /// All reviews authored by any of the given users, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] on database failure.
    async fn list_by_authors(&self, authors: &[UserId]) -> Result<Vec<Review>>;

    /// All reviews responding to tickets authored by the given user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] on database failure.
    async fn list_responding_to(&self, ticket_author: UserId) -> Result<Vec<Review>>;
}

/// Storage for follow edges.
pub trait FollowRepository {
    /// Create a follow edge.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::AlreadyExists`] if the edge already
    /// exists (the uniqueness constraint is authoritative).
    async fn follow(&self, follower: UserId, followed: UserId) -> Result<FollowEdge>;

    /// Remove a follow edge.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::NotFound`] if no such edge exists.
    async fn unfollow(&self, follower: UserId, followed: UserId) -> Result<()>;

    /// Users the given user follows.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] on database failure.
    async fn following_of(&self, user_id: UserId) -> Result<Vec<User>>;

    /// Users following the given user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] on database failure.
    async fn followers_of(&self, user_id: UserId) -> Result<Vec<User>>;

    /// Ids of the users the given user follows (feed clause 1).
    ///
    /// # Errors
    ///
    /// Returns [`crate::DomainError::Storage`] on database failure.
    async fn followed_ids(&self, user_id: UserId) -> Result<Vec<UserId>>;
}
