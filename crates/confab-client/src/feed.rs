//! Message feed operations over the store.
//!
//! [`MessageFeed`] is the screen-facing seam for the conversation log:
//! `send` makes exactly one delivery attempt per user action (retry is the
//! user pressing the button again), and `subscribe` opens a live snapshot
//! subscription. Timestamps are assigned by the store at write time.

use confab_shared::{ConversationId, ResolveError, UserId};
use confab_store::{Message, MessageSubscription, Store, StoreError};

/// Feed over one store handle. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MessageFeed {
    store: Store,
}

impl MessageFeed {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Canonical conversation key for two users, independent of argument
    /// order.
    pub fn resolve(a: &UserId, b: &UserId) -> Result<ConversationId, ResolveError> {
        ConversationId::between(a, b)
    }

    /// Append one message. A sender outside the conversation's participant
    /// pair is rejected before the write.
    pub async fn send(
        &self,
        conversation_id: &ConversationId,
        sender_id: &UserId,
        text: &str,
    ) -> Result<Message, StoreError> {
        if !conversation_id.includes(sender_id) {
            return Err(StoreError::PermissionDenied(format!(
                "{sender_id} is not a participant of {conversation_id}"
            )));
        }

        match self.store.append_message(conversation_id, sender_id, text).await {
            Ok(message) => {
                tracing::info!(
                    conversation = %conversation_id,
                    msg_id = %message.id,
                    "message sent"
                );
                Ok(message)
            }
            Err(e) => {
                tracing::warn!(conversation = %conversation_id, error = %e, "send failed");
                Err(e)
            }
        }
    }

    /// Open a live subscription on the conversation. The caller owns the
    /// returned handle and must release it when the screen closes.
    pub async fn subscribe(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<MessageSubscription, StoreError> {
        self.store.subscribe_messages(conversation_id).await
    }
}
