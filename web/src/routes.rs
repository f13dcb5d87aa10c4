//! Router configuration.
//!
//! Builds the complete Axum router with all endpoints.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, feed, follows, health, reviews, tickets};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// Health checks and authentication live at the root; everything else is
/// nested under `/api` and requires a session token.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Feed and own posts
        .route("/feed", get(feed::get_feed))
        .route("/posts", get(feed::get_posts))
        // Tickets
        .route("/tickets", post(tickets::create_ticket))
        .route("/tickets/:id", put(tickets::update_ticket))
        .route("/tickets/:id", delete(tickets::delete_ticket))
        // Reviews, either in response to a ticket or standalone
        .route("/tickets/:id/reviews", post(reviews::create_review_response))
        .route("/reviews", post(reviews::create_review_direct))
        .route("/reviews/:id", put(reviews::update_review))
        .route("/reviews/:id", delete(reviews::delete_review))
        // Follow management
        .route("/users", get(follows::search_users))
        .route("/following", get(follows::get_following))
        .route("/following", post(follows::follow))
        .route("/following/:user_id", delete(follows::unfollow));

    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout));

    Router::new()
        // Health checks (no authentication)
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/auth", auth_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
