//! Repository implementations for the Reviews domain

pub mod reviews;
pub mod transactions;

use sqlx::PgPool;

pub use reviews::ReviewRepository;

/// Combined repository access for the Reviews domain
#[derive(Clone)]
pub struct ReviewsRepositories {
    pub reviews: ReviewRepository,
}

impl ReviewsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            reviews: ReviewRepository::new(pool),
        }
    }
}
