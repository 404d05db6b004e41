//! State machine for offer status transitions
//!
//! Offer states: Pending → Accepted | Rejected. Both outcomes are
//! terminal: a resolved offer can never be reopened or flipped.

pub use souk_common::StateError;
use serde::{Deserialize, Serialize};

use crate::domain::entities::OfferStatus;

/// Offer negotiation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferState {
    Pending,
    Accepted,
    Rejected,
}

impl OfferState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [OfferState] {
        match self {
            Self::Pending => &[Self::Accepted, Self::Rejected],
            Self::Accepted => &[],
            Self::Rejected => &[],
        }
    }
}

impl std::fmt::Display for OfferState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl From<OfferStatus> for OfferState {
    fn from(status: OfferStatus) -> Self {
        match status {
            OfferStatus::Pending => OfferState::Pending,
            OfferStatus::Accepted => OfferState::Accepted,
            OfferStatus::Rejected => OfferState::Rejected,
        }
    }
}

/// Events that trigger offer state transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OfferEvent {
    /// The recipient accepts the proposed price
    Accept,
    /// The recipient declines the proposed price
    Reject,
}

impl std::fmt::Display for OfferEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accept => write!(f, "accept"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Offer state machine
pub struct OfferStateMachine;

impl OfferStateMachine {
    /// Attempt a state transition
    ///
    /// Returns the new state if the transition is valid, or an error otherwise.
    pub fn transition(current: OfferState, event: OfferEvent) -> Result<OfferState, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (OfferState::Pending, OfferEvent::Accept) => OfferState::Accepted,
            (OfferState::Pending, OfferEvent::Reject) => OfferState::Rejected,

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    to: "unknown".to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: OfferState, event: OfferEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}
