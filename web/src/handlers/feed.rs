//! Feed and own-posts pages.
//!
//! The feed is reassembled from scratch on every request: three clauses
//! fetched from the repositories, merged, de-duplicated and sorted by
//! `litreview_core::assemble_feed`.

use axum::{Json, extract::State};
use litreview_core::repository::{FollowRepository, ReviewRepository, TicketRepository};
use litreview_core::{Post, Review, Ticket, assemble_feed};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::SessionUser;
use crate::state::AppState;

/// A page of feed entries, newest first.
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    /// Tickets and reviews, tagged with `content_type`.
    pub posts: Vec<Post>,
}

fn into_posts(tickets: Vec<Ticket>, reviews: Vec<Review>) -> Vec<Post> {
    tickets
        .into_iter()
        .map(Post::Ticket)
        .chain(reviews.into_iter().map(Post::Review))
        .collect()
}

/// The personalized feed.
///
/// Union of posts by followed users, the caller's own posts, and reviews
/// responding to the caller's tickets; de-duplicated and sorted newest
/// first.
pub async fn get_feed(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<FeedResponse>, AppError> {
    let user_id = session.user_id;

    let followed = state.follows.followed_ids(user_id).await?;

    let followed_posts = into_posts(
        state.tickets.list_by_authors(&followed).await?,
        state.reviews.list_by_authors(&followed).await?,
    );
    let own_posts = into_posts(
        state.tickets.list_by_authors(&[user_id]).await?,
        state.reviews.list_by_authors(&[user_id]).await?,
    );
    let responses = state
        .reviews
        .list_responding_to(user_id)
        .await?
        .into_iter()
        .map(Post::Review)
        .collect();

    let posts = assemble_feed(followed_posts, own_posts, responses);
    tracing::debug!(user_id = %user_id, entries = posts.len(), "Feed assembled");

    Ok(Json(FeedResponse { posts }))
}

/// The caller's own posts, newest first (the "posts" page).
pub async fn get_posts(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<FeedResponse>, AppError> {
    let user_id = session.user_id;
    let own_posts = into_posts(
        state.tickets.list_by_authors(&[user_id]).await?,
        state.reviews.list_by_authors(&[user_id]).await?,
    );

    // Same merge path as the feed, with the other clauses empty.
    let posts = assemble_feed(Vec::new(), own_posts, Vec::new());
    Ok(Json(FeedResponse { posts }))
}
