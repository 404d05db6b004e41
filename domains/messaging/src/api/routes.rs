//! Route definitions for the Messaging domain API

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{conversations, messages, offers};
use super::middleware::MessagingState;

/// Create conversation routes
fn conversation_routes() -> Router<MessagingState> {
    Router::new()
        .route("/v1/conversations", get(conversations::list_conversations))
        .route(
            "/v1/conversations/{counterparty_id}/messages",
            get(conversations::get_conversation),
        )
}

/// Create message and offer routes
fn message_routes() -> Router<MessagingState> {
    Router::new()
        .route("/v1/messages", post(messages::send_message))
        .route("/v1/messages/{id}", delete(messages::delete_message))
        .route("/v1/offers/{message_id}", patch(offers::resolve_offer))
}

/// Create all Messaging domain API routes
pub fn routes() -> Router<MessagingState> {
    Router::new()
        .merge(conversation_routes())
        .merge(message_routes())
}
