//! Domain types for LITReview.
//!
//! All identifiers are UUID newtypes; timestamps are UTC. The types here
//! mirror the persistent schema one-to-one and carry no behavior beyond
//! small accessors, keeping them cheap to clone into HTTP responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Borrow the inner UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_newtype! {
    /// Identifier of a registered user.
    UserId
}

uuid_newtype! {
    /// Identifier of a ticket.
    TicketId
}

uuid_newtype! {
    /// Identifier of a review.
    ReviewId
}

uuid_newtype! {
    /// Opaque bearer token identifying a session.
    SessionToken
}

/// A registered user account.
///
/// The password digest is deliberately not part of this type; it never
/// leaves the persistence layer except through the credential lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Unique username.
    pub username: String,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// A user's request for a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket identifier.
    pub id: TicketId,
    /// Title, at most 128 characters.
    pub title: String,
    /// Optional description, at most 2048 characters.
    pub description: Option<String>,
    /// Owning user.
    pub user_id: UserId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// True once a review has been attached to this ticket.
    pub has_review: bool,
}

/// Feedback attached to a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Review identifier.
    pub id: ReviewId,
    /// Ticket the review responds to.
    pub ticket_id: TicketId,
    /// Rating, between 0 and 5 inclusive.
    pub rating: i16,
    /// Headline, at most 128 characters.
    pub headline: String,
    /// Optional body, at most 8192 characters.
    pub body: Option<String>,
    /// Authoring user.
    pub user_id: UserId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// A directed follow relationship between two users.
///
/// The pair (follower, followed) is unique; self-follows are permitted by
/// the model and handled by feed de-duplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowEdge {
    /// The user doing the following.
    pub follower_id: UserId,
    /// The user being followed.
    pub followed_id: UserId,
    /// When the edge was created.
    pub created_at: DateTime<Utc>,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token presented by the client.
    pub token: SessionToken,
    /// The authenticated user.
    pub user_id: UserId,
    /// When the session was minted.
    pub created_at: DateTime<Utc>,
    /// When the session stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has expired at the given instant.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// A feed entry: either a ticket or a review.
///
/// Serializes with a `content_type` discriminant (`"TICKET"` / `"REVIEW"`)
/// so clients can render mixed lists without probing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "content_type")]
pub enum Post {
    /// A ticket entry.
    #[serde(rename = "TICKET")]
    Ticket(Ticket),
    /// A review entry.
    #[serde(rename = "REVIEW")]
    Review(Review),
}

/// De-duplication key for feed entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostKey {
    kind: PostKind,
    id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum PostKind {
    Ticket,
    Review,
}

impl Post {
    /// Creation time of the underlying entry.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Ticket(t) => t.created_at,
            Self::Review(r) => r.created_at,
        }
    }

    /// Author of the underlying entry.
    #[must_use]
    pub const fn author(&self) -> UserId {
        match self {
            Self::Ticket(t) => t.user_id,
            Self::Review(r) => r.user_id,
        }
    }

    /// Identity key used for de-duplication across feed clauses.
    #[must_use]
    pub const fn key(&self) -> PostKey {
        match self {
            Self::Ticket(t) => PostKey {
                kind: PostKind::Ticket,
                id: t.id.0,
            },
            Self::Review(r) => PostKey {
                kind: PostKind::Review,
                id: r.id.0,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_ticket() -> Ticket {
        Ticket {
            id: TicketId::new(),
            title: "The Left Hand of Darkness".to_string(),
            description: None,
            user_id: UserId::new(),
            created_at: Utc::now(),
            has_review: false,
        }
    }

    #[test]
    fn test_post_serializes_with_content_type_tag() {
        let post = Post::Ticket(sample_ticket());
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["content_type"], "TICKET");
        assert_eq!(json["title"], "The Left Hand of Darkness");
    }

    #[test]
    fn test_post_keys_distinguish_kinds() {
        let ticket = sample_ticket();
        let shared = ticket.id.0;
        let review = Review {
            id: ReviewId::from_uuid(shared),
            ticket_id: ticket.id,
            rating: 4,
            headline: "Splendid".to_string(),
            body: None,
            user_id: UserId::new(),
            created_at: Utc::now(),
        };
        // Same UUID, different kind: must not collide.
        assert_ne!(Post::Ticket(ticket).key(), Post::Review(review).key());
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = Session {
            token: SessionToken::new(),
            user_id: UserId::new(),
            created_at: now,
            expires_at: now + chrono::Duration::days(7),
        };
        assert!(!session.is_expired_at(now));
        assert!(session.is_expired_at(now + chrono::Duration::days(8)));
    }
}
