//! Route definitions for the Reviews domain API

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::reviews;
use super::middleware::ReviewsState;

/// Create review mutation routes
fn review_routes() -> Router<ReviewsState> {
    Router::new()
        .route("/v1/reviews", post(reviews::create_review))
        .route(
            "/v1/reviews/{id}",
            patch(reviews::update_review).delete(reviews::delete_review),
        )
}

/// Create public user-facing read routes
fn user_routes() -> Router<ReviewsState> {
    Router::new()
        .route("/v1/users/{user_id}/reviews", get(reviews::list_user_reviews))
        .route(
            "/v1/users/{user_id}/reputation",
            get(reviews::get_user_reputation),
        )
}

/// Create all Reviews domain API routes
pub fn routes() -> Router<ReviewsState> {
    Router::new().merge(review_routes()).merge(user_routes())
}
