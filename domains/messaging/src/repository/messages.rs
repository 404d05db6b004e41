//! Message repository

use crate::domain::conversations::ConversationSummary;
use crate::domain::entities::{Message, OfferStatus};
use crate::repository::transactions;
use souk_common::Result;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a message and advance its pair's conversation head in one
    /// transaction.
    pub async fn create(&self, msg: &Message) -> Result<Message> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (
                id, sender_id, receiver_id, listing_id, content,
                kind, offer_amount, offer_status, read, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, sender_id, receiver_id, listing_id, content,
                      kind, offer_amount, offer_status, read, created_at
            "#,
        )
        .bind(msg.id)
        .bind(msg.sender_id)
        .bind(msg.receiver_id)
        .bind(msg.listing_id)
        .bind(&msg.content)
        .bind(msg.kind)
        .bind(msg.offer_amount)
        .bind(msg.offer_status)
        .bind(msg.read)
        .bind(msg.created_at)
        .fetch_one(&mut *tx)
        .await?;

        transactions::advance_conversation_head_tx(&mut tx, &created).await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Find a message by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Message>> {
        let msg = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, sender_id, receiver_id, listing_id, content,
                   kind, offer_amount, offer_status, read, created_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(msg)
    }

    /// List messages between two users, most recent first
    pub async fn list_between(
        &self,
        user_id: Uuid,
        counterparty_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, sender_id, receiver_id, listing_id, content,
                   kind, offer_amount, offer_status, read, created_at
            FROM messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(counterparty_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    /// Mark all messages from `counterparty_id` to `receiver_id` as read.
    ///
    /// Returns the number of messages that changed.
    pub async fn mark_read(&self, receiver_id: Uuid, counterparty_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE messages SET read = TRUE
            WHERE receiver_id = $1 AND sender_id = $2 AND read = FALSE
            "#,
        )
        .bind(receiver_id)
        .bind(counterparty_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// List a user's conversations: one entry per counterparty, newest
    /// first, with the viewer's unread count.
    ///
    /// Served from the `conversation_heads` index rather than a scan of
    /// the message log.
    pub async fn list_conversations(&self, viewer: Uuid) -> Result<Vec<ConversationSummary>> {
        let heads = sqlx::query_as::<_, Message>(
            r#"
            SELECT m.id, m.sender_id, m.receiver_id, m.listing_id, m.content,
                   m.kind, m.offer_amount, m.offer_status, m.read, m.created_at
            FROM conversation_heads h
            JOIN messages m ON m.id = h.last_message_id
            WHERE h.user_low = $1 OR h.user_high = $1
            ORDER BY h.last_message_at DESC, h.last_message_id DESC
            "#,
        )
        .bind(viewer)
        .fetch_all(&self.pool)
        .await?;

        #[derive(sqlx::FromRow)]
        struct UnreadRow {
            counterparty_id: Uuid,
            unread: i64,
        }

        let unread_rows: Vec<UnreadRow> = sqlx::query_as(
            r#"
            SELECT sender_id AS counterparty_id, COUNT(*) AS unread
            FROM messages
            WHERE receiver_id = $1 AND read = FALSE
            GROUP BY sender_id
            "#,
        )
        .bind(viewer)
        .fetch_all(&self.pool)
        .await?;

        let unread: HashMap<Uuid, i64> = unread_rows
            .into_iter()
            .map(|r| (r.counterparty_id, r.unread))
            .collect();

        let summaries = heads
            .into_iter()
            .map(|last_message| {
                let counterparty_id = if last_message.sender_id == viewer {
                    last_message.receiver_id
                } else {
                    last_message.sender_id
                };
                ConversationSummary {
                    counterparty_id,
                    unread_count: unread.get(&counterparty_id).copied().unwrap_or(0),
                    last_message,
                }
            })
            .collect();

        Ok(summaries)
    }

    /// Resolve a pending offer with a conditional update.
    ///
    /// The pending→terminal check-and-set is a single statement keyed on
    /// `(id, receiver, kind, pending)`: under concurrent calls at most one
    /// can match. Returns `None` when nothing matched; the caller
    /// diagnoses why.
    pub async fn resolve_offer(
        &self,
        message_id: Uuid,
        receiver_id: Uuid,
        decision: OfferStatus,
    ) -> Result<Option<Message>> {
        let updated = sqlx::query_as::<_, Message>(
            r#"
            UPDATE messages SET offer_status = $3
            WHERE id = $1 AND receiver_id = $2
              AND kind = 'offer' AND offer_status = 'pending'
            RETURNING id, sender_id, receiver_id, listing_id, content,
                      kind, offer_amount, offer_status, read, created_at
            "#,
        )
        .bind(message_id)
        .bind(receiver_id)
        .bind(decision)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a message, only if the caller is its sender.
    ///
    /// Repairs the pair's conversation head in the same transaction.
    /// Returns false when no message matched (missing id or foreign
    /// sender).
    pub async fn delete_own(&self, sender_id: Uuid, message_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        #[derive(sqlx::FromRow)]
        struct DeletedRow {
            sender_id: Uuid,
            receiver_id: Uuid,
        }

        let deleted: Option<DeletedRow> = sqlx::query_as(
            r#"
            DELETE FROM messages
            WHERE id = $1 AND sender_id = $2
            RETURNING sender_id, receiver_id
            "#,
        )
        .bind(message_id)
        .bind(sender_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = deleted else {
            return Ok(false);
        };

        transactions::repair_conversation_head_tx(
            &mut tx,
            row.sender_id,
            row.receiver_id,
            message_id,
        )
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
