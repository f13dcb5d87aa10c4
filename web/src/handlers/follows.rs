//! Follow management: search, follow, unfollow, listings.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use litreview_core::repository::{FollowRepository, UserRepository};
use litreview_core::{FollowEdge, User, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::SessionUser;
use crate::state::AppState;

/// Query parameters for the user search.
#[derive(Debug, Deserialize)]
pub struct SearchUsersQuery {
    /// Username to look up, matched case-insensitively.
    pub username: String,
}

/// Users matching a search.
#[derive(Debug, Serialize)]
pub struct SearchUsersResponse {
    /// Candidate users to follow.
    pub users: Vec<User>,
}

/// Case-insensitive exact username search (the follow-someone flow).
pub async fn search_users(
    _session: SessionUser,
    Query(query): Query<SearchUsersQuery>,
    State(state): State<AppState>,
) -> Result<Json<SearchUsersResponse>, AppError> {
    let users = state.users.search_by_username(&query.username).await?;
    Ok(Json(SearchUsersResponse { users }))
}

/// Following and followers of the caller.
#[derive(Debug, Serialize)]
pub struct FollowingResponse {
    /// Users the caller follows.
    pub following: Vec<User>,
    /// Users following the caller.
    pub followers: Vec<User>,
}

/// List who the caller follows and who follows them.
pub async fn get_following(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<Json<FollowingResponse>, AppError> {
    let following = state.follows.following_of(session.user_id).await?;
    let followers = state.follows.followers_of(session.user_id).await?;
    Ok(Json(FollowingResponse {
        following,
        followers,
    }))
}

/// Request to follow a user found through the search.
#[derive(Debug, Deserialize)]
pub struct FollowRequest {
    /// Id of the user to follow.
    pub user_id: Uuid,
}

/// Follow a user.
///
/// The model does not prevent self-follows; the feed de-duplicates them.
///
/// # Errors
///
/// 404 if the user does not exist, 409 if the edge already exists.
pub async fn follow(
    session: SessionUser,
    State(state): State<AppState>,
    Json(request): Json<FollowRequest>,
) -> Result<(StatusCode, Json<FollowEdge>), AppError> {
    let followed = UserId::from_uuid(request.user_id);
    // Resolve first so a missing user reads as 404, not a constraint error.
    state.users.get_user(followed).await?;

    let edge = state.follows.follow(session.user_id, followed).await?;
    Ok((StatusCode::CREATED, Json(edge)))
}

/// Stop following a user.
///
/// # Errors
///
/// 404 if no such follow edge exists.
pub async fn unfollow(
    session: SessionUser,
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state
        .follows
        .unfollow(session.user_id, UserId::from_uuid(user_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
