//! Transactional free functions for the Reviews domain

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::Reputation;

/// Recompute a user's reputation from their full review set within an
/// existing transaction.
///
/// The cache row is created if missing and then locked, serializing
/// concurrent recomputes per user: two review mutations for the same
/// reviewed user commit their aggregates one after the other, and the
/// later one reads the earlier one's reviews.
pub async fn recompute_reputation_tx(
    transaction: &mut Transaction<'_, Postgres>,
    reviewed_id: Uuid,
) -> std::result::Result<Reputation, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO user_reputation (user_id)
        VALUES ($1)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(reviewed_id)
    .execute(&mut **transaction)
    .await?;

    sqlx::query("SELECT user_id FROM user_reputation WHERE user_id = $1 FOR UPDATE")
        .bind(reviewed_id)
        .fetch_one(&mut **transaction)
        .await?;

    let ratings: Vec<i16> =
        sqlx::query_scalar("SELECT rating FROM reviews WHERE reviewed_id = $1")
            .bind(reviewed_id)
            .fetch_all(&mut **transaction)
            .await?;

    let reputation = Reputation::from_ratings(&ratings);

    sqlx::query(
        r#"
        UPDATE user_reputation
        SET average = $2, count = $3, updated_at = NOW()
        WHERE user_id = $1
        "#,
    )
    .bind(reviewed_id)
    .bind(reputation.average)
    .bind(reputation.count)
    .execute(&mut **transaction)
    .await?;

    Ok(reputation)
}
