//! Live snapshot subscriptions.
//!
//! A [`MessageSubscription`] is the cancellable handle returned by
//! [`Store::subscribe_messages`](crate::Store::subscribe_messages). The
//! store re-publishes the complete ordered message set on every change;
//! the handle hands each publication to its owner in turn. Holders must
//! release the handle when the conversation leaves the screen, or the
//! registration stays live against the store.

use tokio::sync::watch;

use confab_shared::ConversationId;

use crate::models::MessageSnapshot;

/// Lifecycle of one subscription.
///
/// `Subscribing -> Active` on the first delivery; `Active` re-enters itself
/// on every change; `Unsubscribed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Subscribing,
    Active,
    Unsubscribed,
}

/// Cancellable handle delivering full snapshots of one conversation.
#[derive(Debug)]
pub struct MessageSubscription {
    conversation_id: ConversationId,
    rx: Option<watch::Receiver<MessageSnapshot>>,
    state: SubscriptionState,
}

impl MessageSubscription {
    pub(crate) fn new(
        conversation_id: ConversationId,
        rx: watch::Receiver<MessageSnapshot>,
    ) -> Self {
        Self {
            conversation_id,
            rx: Some(rx),
            state: SubscriptionState::Subscribing,
        }
    }

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn state(&self) -> SubscriptionState {
        self.state
    }

    /// Wait for the next full snapshot.
    ///
    /// The first call resolves immediately with the current set. Later
    /// calls resolve once per change, always with the complete ordered set.
    /// Returns `None` after [`unsubscribe`](Self::unsubscribe), and stays
    /// `None` from then on.
    pub async fn next_snapshot(&mut self) -> Option<MessageSnapshot> {
        let rx = self.rx.as_mut()?;

        match self.state {
            SubscriptionState::Unsubscribed => None,
            SubscriptionState::Subscribing => {
                self.state = SubscriptionState::Active;
                Some(rx.borrow_and_update().clone())
            }
            SubscriptionState::Active => match rx.changed().await {
                Ok(()) => Some(rx.borrow_and_update().clone()),
                Err(_) => {
                    // The store dropped this conversation's channel.
                    tracing::debug!(
                        conversation = %self.conversation_id,
                        "snapshot channel closed upstream"
                    );
                    self.release();
                    None
                }
            },
        }
    }

    /// Release the registration. Idempotent: calling it again (or after
    /// drop) is a no-op, and no further snapshots are delivered.
    pub fn unsubscribe(&mut self) {
        if self.rx.is_some() {
            tracing::debug!(conversation = %self.conversation_id, "subscription released");
        }
        self.release();
    }

    fn release(&mut self) {
        self.rx = None;
        self.state = SubscriptionState::Unsubscribed;
    }
}

impl Drop for MessageSubscription {
    fn drop(&mut self) {
        // Scoped acquisition: leaving the screen without an explicit
        // unsubscribe still releases the registration.
        self.release();
    }
}
