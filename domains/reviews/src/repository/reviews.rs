//! Review repository
//!
//! Every review mutation recomputes the reviewed user's reputation in
//! the same transaction; the cache can never observe a half-applied
//! mutation.

use crate::domain::entities::{Reputation, Review};
use crate::repository::transactions;
use souk_common::{Error, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a review and recompute the reviewed user's reputation.
    ///
    /// The `(reviewer_id, listing_id)` unique constraint is the duplicate
    /// guard; a violation rolls the whole transaction back, leaving the
    /// aggregate untouched.
    pub async fn create(&self, review: &Review) -> Result<Review> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (
                id, reviewer_id, reviewed_id, rating, comment,
                listing_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, reviewer_id, reviewed_id, rating, comment,
                      listing_id, created_at, updated_at
            "#,
        )
        .bind(review.id)
        .bind(review.reviewer_id)
        .bind(review.reviewed_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.listing_id)
        .bind(review.created_at)
        .bind(review.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                Error::DuplicateReview("You have already reviewed this transaction".to_string())
            } else {
                Error::Database(e)
            }
        })?;

        transactions::recompute_reputation_tx(&mut tx, created.reviewed_id).await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Find a review by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, reviewer_id, reviewed_id, rating, comment,
                   listing_id, created_at, updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    /// Update a review's rating and/or comment, only if the caller wrote it.
    ///
    /// Returns `None` when no review matched (missing id or foreign
    /// reviewer). Recomputes the aggregate in the same transaction.
    pub async fn update(
        &self,
        reviewer_id: Uuid,
        review_id: Uuid,
        rating: Option<i16>,
        comment: Option<String>,
    ) -> Result<Option<Review>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews SET
                rating = COALESCE($3, rating),
                comment = COALESCE($4, comment),
                updated_at = NOW()
            WHERE id = $1 AND reviewer_id = $2
            RETURNING id, reviewer_id, reviewed_id, rating, comment,
                      listing_id, created_at, updated_at
            "#,
        )
        .bind(review_id)
        .bind(reviewer_id)
        .bind(rating)
        .bind(comment)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(review) = updated else {
            return Ok(None);
        };

        transactions::recompute_reputation_tx(&mut tx, review.reviewed_id).await?;

        tx.commit().await?;
        Ok(Some(review))
    }

    /// Delete a review, only if the caller wrote it.
    ///
    /// Recomputes the aggregate in the same transaction; the last review's
    /// removal resets the reviewed user to average 0, count 0.
    pub async fn delete(&self, reviewer_id: Uuid, review_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let reviewed_id: Option<Uuid> = sqlx::query_scalar(
            r#"
            DELETE FROM reviews
            WHERE id = $1 AND reviewer_id = $2
            RETURNING reviewed_id
            "#,
        )
        .bind(review_id)
        .bind(reviewer_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(reviewed_id) = reviewed_id else {
            return Ok(false);
        };

        transactions::recompute_reputation_tx(&mut tx, reviewed_id).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// List reviews about a user, newest first
    pub async fn list_for_user(&self, reviewed_id: Uuid) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, reviewer_id, reviewed_id, rating, comment,
                   listing_id, created_at, updated_at
            FROM reviews
            WHERE reviewed_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(reviewed_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Read a user's reputation; users with no reviews read as zero.
    pub async fn reputation(&self, user_id: Uuid) -> Result<Reputation> {
        let reputation = sqlx::query_as::<_, Reputation>(
            r#"
            SELECT average, count
            FROM user_reputation
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reputation.unwrap_or_else(Reputation::zero))
    }
}
