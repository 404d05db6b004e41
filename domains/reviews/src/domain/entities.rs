//! Domain entities for the Reviews domain
//!
//! A review records one user's verdict on a transaction with another
//! user. The per-user reputation is a derived cache over the review set;
//! it is never written directly by client input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souk_common::{Error, Result};

/// Maximum comment length (CHECK length <= 500)
const MAX_COMMENT_LENGTH: usize = 500;

/// Review entity
///
/// Invariant: one review per `(reviewer_id, listing_id)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub reviewed_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub listing_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review
    pub fn new(
        reviewer_id: Uuid,
        reviewed_id: Uuid,
        rating: i16,
        comment: String,
        listing_id: Uuid,
    ) -> Result<Self> {
        Self::validate_rating(rating)?;
        Self::validate_comment(&comment)?;

        let now = Utc::now();
        Ok(Review {
            id: Uuid::new_v4(),
            reviewer_id,
            reviewed_id,
            rating,
            comment,
            listing_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate rating (CHECK (rating BETWEEN 1 AND 5))
    pub fn validate_rating(rating: i16) -> Result<()> {
        if !(1..=5).contains(&rating) {
            return Err(Error::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate comment (CHECK (length(trim(comment)) > 0 AND length(comment) <= 500))
    pub fn validate_comment(comment: &str) -> Result<()> {
        if comment.trim().is_empty() {
            return Err(Error::Validation(
                "Comment cannot be empty or whitespace-only".to_string(),
            ));
        }
        if comment.len() > MAX_COMMENT_LENGTH {
            return Err(Error::Validation(format!(
                "Comment must be at most {} characters",
                MAX_COMMENT_LENGTH
            )));
        }
        Ok(())
    }
}

/// Per-user reputation: a pure function of the user's current review set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reputation {
    pub average: f64,
    pub count: i64,
}

impl Reputation {
    /// The reputation of a user with no reviews
    pub fn zero() -> Self {
        Self {
            average: 0.0,
            count: 0,
        }
    }

    /// Reduce a rating set to its mean and count.
    ///
    /// This is the whole aggregation: recomputed from source on every
    /// review mutation rather than adjusted incrementally, so the cache
    /// cannot drift from the review set it summarizes.
    pub fn from_ratings(ratings: &[i16]) -> Self {
        if ratings.is_empty() {
            return Self::zero();
        }

        let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
        let count = ratings.len() as i64;

        Self {
            average: sum as f64 / count as f64,
            count,
        }
    }
}

impl Default for Reputation {
    fn default() -> Self {
        Self::zero()
    }
}
