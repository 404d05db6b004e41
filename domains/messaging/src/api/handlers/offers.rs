//! Offer resolution API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use souk_auth::AuthUser;
use souk_common::{Error, Result};
use souk_listings::ListingStatus;
use uuid::Uuid;

use crate::api::handlers::messages::MessageResponse;
use crate::api::middleware::MessagingState;
use crate::domain::entities::{MessageKind, OfferStatus};
use crate::domain::state::{OfferEvent, OfferState, OfferStateMachine};

/// Request for resolving a pending offer
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ResolveOfferRequest {
    pub decision: OfferDecision,
}

/// The recipient's verdict on a pending offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferDecision {
    Accepted,
    Rejected,
}

impl OfferDecision {
    fn status(self) -> OfferStatus {
        match self {
            OfferDecision::Accepted => OfferStatus::Accepted,
            OfferDecision::Rejected => OfferStatus::Rejected,
        }
    }

    fn event(self) -> OfferEvent {
        match self {
            OfferDecision::Accepted => OfferEvent::Accept,
            OfferDecision::Rejected => OfferEvent::Reject,
        }
    }
}

/// Resolve a pending offer.
///
/// Only the offer's recipient may accept or reject, and only once: the
/// pending→terminal flip is a single conditional update, so of two
/// concurrent calls at most one succeeds and at most one listing
/// reservation fires.
pub async fn resolve_offer(
    AuthUser(ctx): AuthUser,
    State(state): State<MessagingState>,
    Path(message_id): Path<Uuid>,
    Json(req): Json<ResolveOfferRequest>,
) -> Result<Json<MessageResponse>> {
    let resolved = state
        .repos
        .messages
        .resolve_offer(message_id, ctx.user_id, req.decision.status())
        .await?;

    if let Some(updated) = resolved {
        if updated.offer_status == Some(OfferStatus::Accepted) {
            let listing_id = updated.listing_id.ok_or_else(|| {
                Error::Internal("Accepted offer has no listing reference".to_string())
            })?;

            state
                .listings
                .set_status(listing_id, ListingStatus::Pending)
                .await
                .map_err(|e| {
                    tracing::error!(
                        error = %e,
                        listing_id = %listing_id,
                        message_id = %message_id,
                        "Failed to reserve listing for accepted offer"
                    );
                    Error::Internal(format!("Listing reservation failed: {}", e))
                })?;

            tracing::info!(
                listing_id = %listing_id,
                message_id = %message_id,
                "Offer accepted, listing reserved"
            );
        }

        return Ok(Json(updated.into()));
    }

    // The conditional update matched nothing; work out why.
    let msg = state
        .repos
        .messages
        .find(message_id)
        .await?
        .filter(|m| m.kind == MessageKind::Offer)
        .ok_or_else(|| Error::NotFound("Offer not found".to_string()))?;

    if msg.receiver_id != ctx.user_id {
        if msg.sender_id == ctx.user_id {
            return Err(Error::Authorization(
                "Only the offer recipient may resolve it".to_string(),
            ));
        }
        // Don't leak other users' negotiations
        return Err(Error::NotFound("Offer not found".to_string()));
    }

    // Caller is the recipient, so the offer must have left pending already
    // (or is doing so in a concurrent transaction).
    let current = msg
        .offer_status
        .map(OfferState::from)
        .unwrap_or(OfferState::Pending);

    match OfferStateMachine::transition(current, req.decision.event()) {
        Err(e) => Err(Error::InvalidState(e.to_string())),
        Ok(_) => Err(Error::InvalidState(
            "Offer is being resolved concurrently".to_string(),
        )),
    }
}
