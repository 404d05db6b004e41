//! Common state machine error types
//!
//! Shared across domain crates that implement state machines.

use thiserror::Error;

/// Errors raised when a state machine refuses a transition
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("no transition from {from} to {to} on {event}")]
    InvalidTransition {
        from: String,
        to: String,
        event: String,
    },

    #[error("{0} is terminal and accepts no further transitions")]
    TerminalState(String),
}
