//! Operations on `conversations/{id}/messages` collections.
//!
//! Appends assign the document id, the write timestamp, and the
//! per-conversation sequence number; callers never supply any of them.
//! Every successful append publishes a fresh full snapshot to all live
//! subscribers of that conversation.

use chrono::Utc;
use uuid::Uuid;

use confab_shared::{ConversationId, UserId};

use crate::error::{Result, StoreError};
use crate::models::{Message, MessageSnapshot};
use crate::store::{ConversationLog, Store};
use crate::subscription::MessageSubscription;

impl Store {
    /// Append one message to a conversation log.
    ///
    /// The first append to an unknown conversation creates it implicitly;
    /// there is no separate create step.
    pub async fn append_message(
        &self,
        conversation_id: &ConversationId,
        sender_id: &UserId,
        text: &str,
    ) -> Result<Message> {
        self.ensure_writable()?;
        if text.trim().is_empty() {
            return Err(StoreError::EmptyMessage);
        }

        let mut conversations = self.inner.conversations.write().await;
        let log = conversations
            .entry(conversation_id.clone())
            .or_insert_with(|| ConversationLog::new(conversation_id.clone()));

        let message = Message {
            id: Uuid::new_v4(),
            conversation_id: conversation_id.clone(),
            sender_id: sender_id.clone(),
            text: text.to_string(),
            // Write-time authority: the store's clock, not the caller's.
            timestamp: Utc::now(),
            seq: log.next_seq,
        };
        log.next_seq += 1;
        log.messages.push(message.clone());

        publish_snapshot(conversation_id, log);

        tracing::debug!(
            conversation = %conversation_id,
            sender = %sender_id,
            msg_id = %message.id,
            seq = message.seq,
            "message appended"
        );
        Ok(message)
    }

    /// One-shot ordered read of a conversation's current messages.
    ///
    /// Unknown conversations read as empty rather than missing.
    pub async fn messages_for(&self, conversation_id: &ConversationId) -> Result<MessageSnapshot> {
        self.ensure_readable()?;

        let conversations = self.inner.conversations.read().await;
        Ok(match conversations.get(conversation_id) {
            Some(log) => snapshot_of(conversation_id, log),
            None => MessageSnapshot::empty(conversation_id.clone()),
        })
    }

    /// Open a live snapshot subscription on a conversation.
    ///
    /// The first [`MessageSubscription::next_snapshot`] resolves immediately
    /// with the current set; each later call waits for a change and delivers
    /// the complete set again. Subscribing materializes the conversation the
    /// same way a first append does.
    pub async fn subscribe_messages(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<MessageSubscription> {
        self.ensure_readable()?;

        let mut conversations = self.inner.conversations.write().await;
        // The watch channel always holds the current set, so a subscriber
        // joining mid-conversation is seeded without an extra publish.
        let log = conversations
            .entry(conversation_id.clone())
            .or_insert_with(|| ConversationLog::new(conversation_id.clone()));

        tracing::debug!(conversation = %conversation_id, "subscription opened");
        Ok(MessageSubscription::new(
            conversation_id.clone(),
            log.snapshot_tx.subscribe(),
        ))
    }
}

/// Sort messages for display: `timestamp` descending, `seq` descending as
/// the deterministic tie-break for identical timestamps.
pub(crate) fn sort_for_display(messages: &mut [Message]) {
    messages.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.seq.cmp(&a.seq))
    });
}

fn snapshot_of(conversation_id: &ConversationId, log: &ConversationLog) -> MessageSnapshot {
    let mut messages = log.messages.clone();
    sort_for_display(&mut messages);
    MessageSnapshot {
        conversation_id: conversation_id.clone(),
        messages,
    }
}

fn publish_snapshot(conversation_id: &ConversationId, log: &ConversationLog) {
    log.snapshot_tx
        .send_replace(snapshot_of(conversation_id, log));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dm(a: &str, b: &str) -> ConversationId {
        ConversationId::between(&UserId::from(a), &UserId::from(b)).unwrap()
    }

    #[tokio::test]
    async fn appends_are_read_back_newest_first() {
        let store = Store::new();
        let conv = dm("u1", "u2");

        store
            .append_message(&conv, &UserId::from("u1"), "hi")
            .await
            .unwrap();
        store
            .append_message(&conv, &UserId::from("u2"), "yo")
            .await
            .unwrap();

        let snapshot = store.messages_for(&conv).await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.messages[0].text, "yo");
        assert_eq!(snapshot.messages[1].text, "hi");
    }

    #[tokio::test]
    async fn unknown_conversation_reads_as_empty() {
        let store = Store::new();
        let snapshot = store.messages_for(&dm("u1", "u2")).await.unwrap();
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn rejects_blank_text() {
        let store = Store::new();
        let conv = dm("u1", "u2");

        let err = store
            .append_message(&conv, &UserId::from("u1"), "   ")
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::EmptyMessage);

        // Nothing was written.
        assert!(store.messages_for(&conv).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn offline_append_fails_with_write_failure() {
        let store = Store::new();
        let conv = dm("u1", "u2");
        store.set_online(false);

        let err = store
            .append_message(&conv, &UserId::from("u1"), "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::WriteFailure(_)));
    }

    #[tokio::test]
    async fn timestamps_come_from_the_store() {
        let store = Store::new();
        let conv = dm("u1", "u2");

        let before = Utc::now();
        let msg = store
            .append_message(&conv, &UserId::from("u1"), "hi")
            .await
            .unwrap();
        let after = Utc::now();

        assert!(msg.timestamp >= before && msg.timestamp <= after);
        assert_eq!(msg.seq, 0);
    }

    #[test]
    fn equal_timestamps_break_ties_by_seq_descending() {
        let conv = dm("u1", "u2");
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mk = |seq: u64, text: &str| Message {
            id: Uuid::new_v4(),
            conversation_id: conv.clone(),
            sender_id: UserId::from("u1"),
            text: text.into(),
            timestamp: ts,
            seq,
        };

        let mut messages = vec![mk(0, "first"), mk(2, "third"), mk(1, "second")];
        sort_for_display(&mut messages);

        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["third", "second", "first"]);
    }
}
