//! Feed assembly.
//!
//! The feed for a user U is the union of three clauses:
//!
//! 1. tickets and reviews authored by users U follows,
//! 2. tickets and reviews authored by U,
//! 3. reviews responding to U's tickets, regardless of whether U follows
//!    their authors.
//!
//! The union is de-duplicated (an entry can satisfy several clauses, and
//! a self-follow would otherwise duplicate every own post) and sorted
//! descending by creation time. No pagination and no caching: the feed is
//! reassembled from scratch on every request.

use crate::types::Post;
use std::collections::HashSet;

/// Merge the three feed clauses into a single de-duplicated,
/// reverse-chronological list.
///
/// Ties on the timestamp are broken by the entry key so the ordering is
/// deterministic across requests.
#[must_use]
pub fn assemble_feed(
    followed_posts: Vec<Post>,
    own_posts: Vec<Post>,
    responses_to_own: Vec<Post>,
) -> Vec<Post> {
    let mut seen = HashSet::new();
    let mut posts: Vec<Post> = followed_posts
        .into_iter()
        .chain(own_posts)
        .chain(responses_to_own)
        .filter(|post| seen.insert(post.key()))
        .collect();

    posts.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| a.key().cmp(&b.key()))
    });
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Review, ReviewId, Ticket, TicketId, UserId};
    use chrono::{Duration, TimeZone, Utc};

    fn ticket_at(author: UserId, minutes: i64) -> Post {
        Post::Ticket(Ticket {
            id: TicketId::new(),
            title: format!("ticket at {minutes}"),
            description: None,
            user_id: author,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().unwrap_or_default()
                + Duration::minutes(minutes),
            has_review: false,
        })
    }

    fn review_at(author: UserId, ticket_id: TicketId, minutes: i64) -> Post {
        Post::Review(Review {
            id: ReviewId::new(),
            ticket_id,
            rating: 4,
            headline: format!("review at {minutes}"),
            body: None,
            user_id: author,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().unwrap_or_default()
                + Duration::minutes(minutes),
        })
    }

    #[test]
    fn test_sorted_newest_first() {
        let me = UserId::new();
        let followed = UserId::new();
        let feed = assemble_feed(
            vec![ticket_at(followed, 5), ticket_at(followed, 30)],
            vec![ticket_at(me, 10)],
            vec![],
        );
        let times: Vec<_> = feed.iter().map(Post::created_at).collect();
        let mut expected = times.clone();
        expected.sort();
        expected.reverse();
        assert_eq!(times, expected);
        assert_eq!(feed.len(), 3);
    }

    #[test]
    fn test_self_follow_does_not_duplicate_posts() {
        // Following yourself puts your own posts in both clause 1 and 2.
        let me = UserId::new();
        let own = ticket_at(me, 0);
        let feed = assemble_feed(vec![own.clone()], vec![own], vec![]);
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn test_response_satisfying_two_clauses_appears_once() {
        // A followed user reviewing my ticket matches clauses 1 and 3.
        let me = UserId::new();
        let followed = UserId::new();
        let my_ticket = ticket_at(me, 0);
        let Post::Ticket(ref t) = my_ticket else {
            return;
        };
        let response = review_at(followed, t.id, 1);
        let feed = assemble_feed(
            vec![response.clone()],
            vec![my_ticket],
            vec![response],
        );
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn test_responses_included_without_following_author() {
        // Clause 3: a stranger's review of my ticket shows up even though
        // the stranger is in no follow list.
        let me = UserId::new();
        let stranger = UserId::new();
        let my_ticket = ticket_at(me, 0);
        let Post::Ticket(ref t) = my_ticket else {
            return;
        };
        let response = review_at(stranger, t.id, 2);
        let feed = assemble_feed(vec![], vec![my_ticket], vec![response.clone()]);
        assert!(feed.contains(&response));
    }

    #[test]
    fn test_empty_inputs_yield_empty_feed() {
        assert!(assemble_feed(vec![], vec![], vec![]).is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arbitrary_posts() -> impl Strategy<Value = Vec<Post>> {
            // A small pool of authors/minutes makes duplicates and timestamp
            // ties likely, which is exactly what the merge must handle.
            prop::collection::vec((0u8..4, 0i64..16), 0..24).prop_map(|entries| {
                let authors: Vec<UserId> = (0..4).map(|_| UserId::new()).collect();
                entries
                    .into_iter()
                    .map(|(author, minutes)| ticket_at(authors[author as usize], minutes))
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn feed_is_sorted_and_duplicate_free(
                followed in arbitrary_posts(),
                own in arbitrary_posts(),
            ) {
                // Duplicate some entries across clauses on purpose.
                let responses: Vec<Post> = followed.iter().take(3).cloned().collect();
                let feed = assemble_feed(followed.clone(), own.clone(), responses);

                for pair in feed.windows(2) {
                    prop_assert!(pair[0].created_at() >= pair[1].created_at());
                }

                let mut keys: Vec<_> = feed.iter().map(Post::key).collect();
                let total = keys.len();
                keys.sort();
                keys.dedup();
                prop_assert_eq!(total, keys.len());

                // Union: every input key is present.
                for post in followed.iter().chain(own.iter()) {
                    prop_assert!(feed.iter().any(|p| p.key() == post.key()));
                }
            }
        }
    }
}
