//! Message API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use souk_auth::AuthUser;
use souk_common::{Error, Result, ValidatedJson};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::MessagingState;
use crate::domain::entities::{Message, MessageKind, OfferStatus};

/// Request for sending a message or an offer
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Recipient user id
    pub receiver_id: Uuid,

    /// Message content
    #[validate(length(min = 1))]
    pub content: String,

    /// Message kind; defaults to a plain message
    #[serde(default)]
    pub kind: MessageKind,

    /// Listing the message refers to (required for offers)
    pub listing_id: Option<Uuid>,

    /// Proposed price (offers only)
    pub offer_amount: Option<Decimal>,
}

/// Message response DTO
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub listing_id: Option<Uuid>,
    pub content: String,
    pub kind: MessageKind,
    pub offer_amount: Option<Decimal>,
    pub offer_status: Option<OfferStatus>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            sender_id: m.sender_id,
            receiver_id: m.receiver_id,
            listing_id: m.listing_id,
            content: m.content,
            kind: m.kind,
            offer_amount: m.offer_amount,
            offer_status: m.offer_status,
            read: m.read,
            created_at: m.created_at,
        }
    }
}

/// Send a message to another user
pub async fn send_message(
    AuthUser(ctx): AuthUser,
    State(state): State<MessagingState>,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let message = match req.kind {
        MessageKind::Plain => {
            if req.offer_amount.is_some() {
                return Err(Error::Validation(
                    "Plain messages cannot carry an offer amount".to_string(),
                ));
            }
            Message::new_plain(ctx.user_id, req.receiver_id, req.content, req.listing_id)?
        }
        MessageKind::Offer => {
            let listing_id = req.listing_id.ok_or_else(|| {
                Error::Validation("Offers must reference a listing".to_string())
            })?;
            let offer_amount = req.offer_amount.ok_or_else(|| {
                Error::Validation("Offers must carry an offer amount".to_string())
            })?;
            Message::new_offer(
                ctx.user_id,
                req.receiver_id,
                req.content,
                listing_id,
                offer_amount,
            )?
        }
    };

    let created = state.repos.messages.create(&message).await?;

    tracing::debug!(
        message_id = %created.id,
        kind = %created.kind,
        "Message sent"
    );

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Delete one of the caller's own messages
pub async fn delete_message(
    AuthUser(ctx): AuthUser,
    State(state): State<MessagingState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let deleted = state.repos.messages.delete_own(ctx.user_id, id).await?;

    if !deleted {
        return Err(Error::NotFound("Message not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
