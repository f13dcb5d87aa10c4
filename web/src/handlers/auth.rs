//! Signup, login and logout.
//!
//! Sessions are opaque UUID bearer tokens stored server-side. Login never
//! reveals whether the username or the password was the wrong half of the
//! pair.

use axum::{Json, extract::State, http::StatusCode};
use litreview_core::repository::{SessionRepository, UserRepository};
use litreview_core::{DomainError, User, password, validate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::SessionUser;
use crate::state::AppState;

/// Request to create an account.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Desired username.
    pub username: String,
    /// Password, at least 8 characters.
    pub password: String,
}

/// Response after account creation.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    /// The created user.
    pub user: User,
}

/// Create a new account.
///
/// # Errors
///
/// 422 on invalid username/password, 409 if the username is taken.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    validate::validate_username(&request.username)?;
    validate::validate_password(&request.password)?;

    let digest = password::hash_password(&request.password);
    let user = state.users.create_user(&request.username, &digest).await?;

    Ok((StatusCode::CREATED, Json(SignupResponse { user })))
}

/// Request to log in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Response after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token to present on authenticated routes.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

/// Verify credentials and mint a session.
///
/// # Errors
///
/// 401 on unknown username or wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (user, digest) = state
        .users
        .find_with_digest(&request.username)
        .await?
        .ok_or(DomainError::InvalidCredentials)?;

    if !password::verify_password(&request.password, &digest)? {
        return Err(DomainError::InvalidCredentials.into());
    }

    let session = state.sessions.create_session(user.id, state.session_ttl).await?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        token: session.token.to_string(),
        user,
    }))
}

/// Revoke the current session.
pub async fn logout(
    session: SessionUser,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.sessions.delete_session(session.session.token).await?;
    tracing::info!(user_id = %session.user_id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}
