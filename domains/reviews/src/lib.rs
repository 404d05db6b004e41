//! Reviews domain: transaction reviews and the derived per-user
//! reputation aggregate

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Reputation, Review};

// Re-export repository types
pub use repository::{ReviewRepository, ReviewsRepositories};

// Re-export API types
pub use api::routes;
pub use api::ReviewsState;
