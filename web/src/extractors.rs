//! Custom Axum extractors.
//!
//! - `BearerToken`: the raw `Authorization: Bearer <token>` value.
//! - `SessionUser`: validated session; use as a handler parameter to
//!   require authentication.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use litreview_core::UserId;
use litreview_core::repository::SessionRepository;
use litreview_core::types::{Session, SessionToken};
use uuid::Uuid;

/// Bearer token extracted from the `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| {
                AppError::unauthorized("Invalid authorization format. Expected 'Bearer <token>'")
            })?
            .to_string();

        if token.is_empty() {
            return Err(AppError::unauthorized("Empty bearer token"));
        }

        Ok(Self(token))
    }
}

/// Authenticated session user.
///
/// Extracts and validates the session from the bearer token. Expired or
/// unknown tokens reject with 401.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The authenticated user ID
    pub user_id: UserId,
    /// The full session
    pub session: Session,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = BearerToken::from_request_parts(parts, state).await?;

        let uuid = Uuid::parse_str(&bearer.0)
            .map_err(|_| AppError::unauthorized("Invalid session token format"))?;
        let token = SessionToken::from_uuid(uuid);

        let session = state
            .sessions
            .get_session(token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Session expired or unknown"))?;

        Ok(Self {
            user_id: session.user_id,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_bearer_token_parsing() {
        let token = "550e8400-e29b-41d4-a716-446655440000";
        let header = format!("Bearer {token}");
        assert_eq!(header.strip_prefix("Bearer "), Some(token));
    }

    #[test]
    fn test_invalid_bearer_format() {
        let invalid = "Basic dXNlcjpwYXNz";
        assert!(invalid.strip_prefix("Bearer ").is_none());
    }
}
