//! Conversation API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use souk_auth::AuthUser;
use souk_common::{Pagination, Result};
use uuid::Uuid;

use crate::api::handlers::messages::MessageResponse;
use crate::api::middleware::MessagingState;
use crate::domain::conversations::ConversationSummary;

/// Conversation list entry DTO
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub counterparty_id: Uuid,
    pub last_message: MessageResponse,
    pub unread_count: i64,
}

impl From<ConversationSummary> for ConversationResponse {
    fn from(s: ConversationSummary) -> Self {
        Self {
            counterparty_id: s.counterparty_id,
            last_message: s.last_message.into(),
            unread_count: s.unread_count,
        }
    }
}

/// List the caller's conversations, newest first
pub async fn list_conversations(
    AuthUser(ctx): AuthUser,
    State(state): State<MessagingState>,
) -> Result<Json<Vec<ConversationResponse>>> {
    let summaries = state.repos.messages.list_conversations(ctx.user_id).await?;

    let responses: Vec<ConversationResponse> = summaries.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}

/// Fetch the thread with one counterparty, oldest first.
///
/// Viewing the thread marks the counterparty's messages to the caller as
/// read; the read flag belongs to the receiver alone.
pub async fn get_conversation(
    AuthUser(ctx): AuthUser,
    State(state): State<MessagingState>,
    Path(counterparty_id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<MessageResponse>>> {
    let mut messages = state
        .repos
        .messages
        .list_between(ctx.user_id, counterparty_id, pagination.limit())
        .await?;

    let marked = state
        .repos
        .messages
        .mark_read(ctx.user_id, counterparty_id)
        .await?;

    if marked > 0 {
        tracing::debug!(
            counterparty_id = %counterparty_id,
            marked,
            "Marked messages as read"
        );
    }

    // Fetched newest-first for the limit window; rendered chronologically
    messages.reverse();

    let responses: Vec<MessageResponse> = messages.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}
