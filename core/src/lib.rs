//! # LITReview Core
//!
//! Domain types and logic for the LITReview application.
//!
//! This crate is the functional core of the workspace: plain data types,
//! field validation, password digests and the feed assembly algorithm.
//! It performs no I/O; persistence is specified through the repository
//! traits in [`repository`] and implemented by `litreview-postgres`.
//!
//! ## Domain
//!
//! - **Ticket**: a user's request for a review of some work.
//! - **Review**: feedback (rating + text) attached to a ticket.
//! - **Follow edge**: a directed relationship granting visibility of
//!   another user's posts in one's feed.
//! - **Feed**: the aggregated, time-sorted view of tickets and reviews
//!   relevant to a user.

pub mod error;
pub mod feed;
pub mod password;
pub mod repository;
pub mod types;
pub mod validate;

pub use error::{DomainError, Result};
pub use feed::assemble_feed;
pub use types::{FollowEdge, Post, Review, ReviewId, Session, SessionToken, Ticket, TicketId, User, UserId};
