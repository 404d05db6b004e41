//! Domain entities for the Messaging domain
//!
//! A message is a directed record from one user to another, optionally
//! referencing a listing. Offer messages additionally carry a proposed
//! price and a negotiation status.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souk_common::{Error, Result};

/// Message kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "message_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Plain,
    Offer,
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageKind::Plain => write!(f, "plain"),
            MessageKind::Offer => write!(f, "offer"),
        }
    }
}

/// Offer negotiation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "offer_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferStatus::Pending => write!(f, "pending"),
            OfferStatus::Accepted => write!(f, "accepted"),
            OfferStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Message entity
///
/// Invariant: `offer_amount` and `offer_status` are present iff
/// `kind == Offer`, and offers always reference a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
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

impl Message {
    /// Create a new plain message
    pub fn new_plain(
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
        listing_id: Option<Uuid>,
    ) -> Result<Self> {
        Self::validate_parties(sender_id, receiver_id)?;
        Self::validate_content(&content)?;

        Ok(Message {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            listing_id,
            content,
            kind: MessageKind::Plain,
            offer_amount: None,
            offer_status: None,
            read: false,
            created_at: Utc::now(),
        })
    }

    /// Create a new offer message.
    ///
    /// Offers start in `pending` and must name the listing they bid on.
    pub fn new_offer(
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
        listing_id: Uuid,
        offer_amount: Decimal,
    ) -> Result<Self> {
        Self::validate_parties(sender_id, receiver_id)?;
        Self::validate_content(&content)?;

        if offer_amount.is_sign_negative() {
            return Err(Error::Validation(
                "Offer amount cannot be negative".to_string(),
            ));
        }

        Ok(Message {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            listing_id: Some(listing_id),
            content,
            kind: MessageKind::Offer,
            offer_amount: Some(offer_amount),
            offer_status: Some(OfferStatus::Pending),
            read: false,
            created_at: Utc::now(),
        })
    }

    /// Validate sender/receiver (CHECK (sender_id <> receiver_id))
    fn validate_parties(sender_id: Uuid, receiver_id: Uuid) -> Result<()> {
        if sender_id == receiver_id {
            return Err(Error::Validation(
                "Cannot send a message to yourself".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate message content (CHECK (length(trim(content)) > 0))
    fn validate_content(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(Error::Validation(
                "Message content cannot be empty or whitespace-only".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether this message is an offer
    pub fn is_offer(&self) -> bool {
        self.kind == MessageKind::Offer
    }
}
