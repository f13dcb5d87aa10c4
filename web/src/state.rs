//! Application state for the LITReview HTTP server.
//!
//! Contains all shared resources needed by HTTP handlers: one repository
//! per entity, all cloning the same connection pool, plus the session
//! time-to-live from configuration.

use chrono::Duration;
use litreview_postgres::{
    PostgresFollowStore, PostgresReviewStore, PostgresSessionStore, PostgresTicketStore,
    PostgresUserStore,
};
use sqlx::PgPool;

/// Application state shared across all HTTP handlers.
///
/// Cloned cheaply for each request; every store holds the same pool.
#[derive(Clone)]
pub struct AppState {
    /// User accounts and credentials.
    pub users: PostgresUserStore,
    /// Bearer-token sessions.
    pub sessions: PostgresSessionStore,
    /// Tickets.
    pub tickets: PostgresTicketStore,
    /// Reviews.
    pub reviews: PostgresReviewStore,
    /// Follow edges.
    pub follows: PostgresFollowStore,
    /// Session lifetime applied at login.
    pub session_ttl: Duration,
}

impl AppState {
    /// Build the application state over a connection pool.
    #[must_use]
    pub fn new(pool: PgPool, session_ttl: Duration) -> Self {
        Self {
            users: PostgresUserStore::new(pool.clone()),
            sessions: PostgresSessionStore::new(pool.clone()),
            tickets: PostgresTicketStore::new(pool.clone()),
            reviews: PostgresReviewStore::new(pool.clone()),
            follows: PostgresFollowStore::new(pool),
            session_ttl,
        }
    }
}
