//! HTTP handlers for the Messaging domain

pub mod conversations;
pub mod messages;
pub mod offers;

pub use messages::MessageResponse;
