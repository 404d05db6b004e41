//! Derived conversation views
//!
//! A conversation is not a stored entity: it is the most recent message
//! exchanged with each counterparty plus the viewer's unread count,
//! recomputed on read. `fold_conversations` is the reference reduction
//! over an ordered message sequence; the repository serves the same
//! shape from the incrementally maintained per-pair head index.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Message;

/// One entry in a user's conversation list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationSummary {
    pub counterparty_id: Uuid,
    pub last_message: Message,
    pub unread_count: i64,
}

/// Group `viewer`'s messages by counterparty and reduce each group to its
/// most recent message and the viewer's unread count.
///
/// The winner within a group is the arg-max by `(created_at, id)`; the id
/// breaks timestamp ties deterministically. Groups are ordered by that same
/// key, newest first. Messages not involving `viewer` are ignored.
pub fn fold_conversations(viewer: Uuid, messages: &[Message]) -> Vec<ConversationSummary> {
    // counterparty -> (index of current winner, unread count)
    let mut groups: HashMap<Uuid, (usize, i64)> = HashMap::new();

    for (idx, msg) in messages.iter().enumerate() {
        let counterparty = if msg.sender_id == viewer {
            msg.receiver_id
        } else if msg.receiver_id == viewer {
            msg.sender_id
        } else {
            continue;
        };

        let entry = groups.entry(counterparty).or_insert((idx, 0));

        let winner = &messages[entry.0];
        if (msg.created_at, msg.id) > (winner.created_at, winner.id) {
            entry.0 = idx;
        }

        if msg.receiver_id == viewer && !msg.read {
            entry.1 += 1;
        }
    }

    let mut summaries: Vec<ConversationSummary> = groups
        .into_iter()
        .map(|(counterparty_id, (idx, unread_count))| ConversationSummary {
            counterparty_id,
            last_message: messages[idx].clone(),
            unread_count,
        })
        .collect();

    summaries.sort_by(|a, b| {
        (b.last_message.created_at, b.last_message.id)
            .cmp(&(a.last_message.created_at, a.last_message.id))
    });

    summaries
}
