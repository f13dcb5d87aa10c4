//! Error taxonomy for domain and persistence operations.

use thiserror::Error;

/// Result type alias for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Failure modes shared across the workspace.
///
/// Repositories map database failures into this taxonomy so that the web
/// layer can translate each variant into exactly one HTTP status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed validation (length bound, rating range, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced record does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Human-readable resource name ("ticket", "review", "user", ...).
        resource: &'static str,
    },

    /// A uniqueness constraint was violated.
    #[error("{0} already exists")]
    AlreadyExists(&'static str),

    /// Username/password pair did not match a stored credential.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The actor does not own the record it tried to mutate.
    #[error("not the owner of this {0}")]
    Forbidden(&'static str),

    /// The persistence layer failed for an unanticipated reason.
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Shorthand for a [`DomainError::NotFound`] with the given resource name.
    #[must_use]
    pub const fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            DomainError::Validation("rating must be between 0 and 5".into()).to_string(),
            "validation failed: rating must be between 0 and 5"
        );
        assert_eq!(DomainError::not_found("ticket").to_string(), "ticket not found");
        assert_eq!(
            DomainError::Forbidden("review").to_string(),
            "not the owner of this review"
        );
    }
}
