//! Transactional free functions for the Messaging domain
//!
//! The per-pair conversation head index must move in lockstep with the
//! message log, so these run inside the caller's transaction.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::Message;

/// Normalize an unordered user pair to the `(user_low, user_high)` key.
fn pair_key(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Advance the conversation head for the message's pair within an existing
/// transaction.
///
/// The guarded upsert keeps the head an arg-max by `(last_message_at, id)`
/// even when two appends for the same pair commit close together.
pub async fn advance_conversation_head_tx(
    transaction: &mut Transaction<'_, Postgres>,
    message: &Message,
) -> std::result::Result<(), sqlx::Error> {
    let (user_low, user_high) = pair_key(message.sender_id, message.receiver_id);

    sqlx::query(
        r#"
        INSERT INTO conversation_heads (user_low, user_high, last_message_id, last_message_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_low, user_high) DO UPDATE
        SET last_message_id = EXCLUDED.last_message_id,
            last_message_at = EXCLUDED.last_message_at
        WHERE (EXCLUDED.last_message_at, EXCLUDED.last_message_id)
            > (conversation_heads.last_message_at, conversation_heads.last_message_id)
        "#,
    )
    .bind(user_low)
    .bind(user_high)
    .bind(message.id)
    .bind(message.created_at)
    .execute(&mut **transaction)
    .await?;

    Ok(())
}

/// Repair the conversation head after a message deletion within an existing
/// transaction.
///
/// If the deleted message was the pair's head, the head falls back to the
/// most recent remaining message, or the row is removed when the pair has
/// no messages left.
pub async fn repair_conversation_head_tx(
    transaction: &mut Transaction<'_, Postgres>,
    sender_id: Uuid,
    receiver_id: Uuid,
    deleted_message_id: Uuid,
) -> std::result::Result<(), sqlx::Error> {
    let (user_low, user_high) = pair_key(sender_id, receiver_id);

    let head: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT last_message_id FROM conversation_heads
        WHERE user_low = $1 AND user_high = $2
        FOR UPDATE
        "#,
    )
    .bind(user_low)
    .bind(user_high)
    .fetch_optional(&mut **transaction)
    .await?;

    if head != Some(deleted_message_id) {
        return Ok(());
    }

    #[derive(sqlx::FromRow)]
    struct Remaining {
        id: Uuid,
        created_at: chrono::DateTime<chrono::Utc>,
    }

    let remaining: Option<Remaining> = sqlx::query_as(
        r#"
        SELECT id, created_at FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(sender_id)
    .bind(receiver_id)
    .fetch_optional(&mut **transaction)
    .await?;

    match remaining {
        Some(latest) => {
            sqlx::query(
                r#"
                UPDATE conversation_heads
                SET last_message_id = $3, last_message_at = $4
                WHERE user_low = $1 AND user_high = $2
                "#,
            )
            .bind(user_low)
            .bind(user_high)
            .bind(latest.id)
            .bind(latest.created_at)
            .execute(&mut **transaction)
            .await?;
        }
        None => {
            sqlx::query(
                "DELETE FROM conversation_heads WHERE user_low = $1 AND user_high = $2",
            )
            .bind(user_low)
            .bind(user_high)
            .execute(&mut **transaction)
            .await?;
        }
    }

    Ok(())
}
