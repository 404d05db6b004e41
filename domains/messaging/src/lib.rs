//! Messaging domain: direct messages between users, derived conversation
//! views, and the price-offer lifecycle

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::conversations::{fold_conversations, ConversationSummary};
pub use domain::entities::{Message, MessageKind, OfferStatus};
pub use domain::state::{OfferEvent, OfferState, OfferStateMachine, StateError};

// Re-export repository types
pub use repository::{MessageRepository, MessagingRepositories};

// Re-export API types
pub use api::routes;
pub use api::MessagingState;
